//! Pixel source adapters.
//!
//! Every supported storage layout gets its own [`Sampler`] so the convolution
//! loop is monomorphized per format. The layout is picked once per resize call
//! through [`Source`]; rasters without a dedicated layout go through
//! [`GenericSampler`] and the [`Raster`] trait.


use crate::{
    image::{
        Gray8Image, Gray16Image, PackedImage, Raster, Rect, Rgba8Image, Rgba64Image, YCbCrImage,
    },
    util::{Color, Pixel, math::replicate_border},
};

/// Reads source pixels for the convolution engine.
pub trait Sampler: Sync {
    #[must_use]
    fn bounds(&self) -> Rect;

    /// Premultiplied RGBA in 16-bit units at `(x, y)`.
    ///
    /// Coordinates outside the bounds are replicated from the nearest edge.
    /// Bounds must not be empty.
    #[must_use]
    fn sample(&self, x: isize, y: isize) -> Color;
}

/// Clamps `(x, y)` into `r` by border replication.
#[must_use]
#[inline]
pub fn clamp_to(r: &Rect, x: isize, y: isize) -> (i32, i32) {
    (
        replicate_border(x, r.min_x as isize, r.max_x as isize) as i32,
        replicate_border(y, r.min_y as isize, r.max_y as isize) as i32,
    )
}

#[inline]
fn widen(c: [u16; 4]) -> Color {
    [
        f32::from(c[0]),
        f32::from(c[1]),
        f32::from(c[2]),
        f32::from(c[3]),
    ]
}

impl<T: Pixel> Sampler for PackedImage<T, 4> {
    fn bounds(&self) -> Rect {
        self.rect
    }

    #[inline]
    fn sample(&self, x: isize, y: isize) -> Color {
        let (x, y) = clamp_to(&self.rect, x, y);
        widen(self.rgba_at(x, y))
    }
}

impl<T: Pixel> Sampler for PackedImage<T, 1> {
    fn bounds(&self) -> Rect {
        self.rect
    }

    #[inline]
    fn sample(&self, x: isize, y: isize) -> Color {
        let (x, y) = clamp_to(&self.rect, x, y);
        widen(self.gray_at(x, y))
    }
}

impl Sampler for YCbCrImage {
    fn bounds(&self) -> Rect {
        self.rect
    }

    #[inline]
    fn sample(&self, x: isize, y: isize) -> Color {
        let (x, y) = clamp_to(&self.rect, x, y);
        widen(self.rgba64(x, y))
    }
}

/// Slow path for rasters without a known storage layout.
#[derive(Clone, Copy)]
pub struct GenericSampler<'a>(pub &'a dyn Raster);

impl Sampler for GenericSampler<'_> {
    fn bounds(&self) -> Rect {
        self.0.bounds()
    }

    #[inline]
    fn sample(&self, x: isize, y: isize) -> Color {
        let (x, y) = clamp_to(&self.0.bounds(), x, y);
        widen(self.0.rgba64(x, y))
    }
}

/// The storage layout of a source image, chosen once per resize call.
#[derive(Clone, Copy)]
pub enum Source<'a> {
    Rgba8(&'a Rgba8Image),
    Rgba64(&'a Rgba64Image),
    Gray8(&'a Gray8Image),
    Gray16(&'a Gray16Image),
    YCbCr(&'a YCbCrImage),
    Generic(&'a dyn Raster),
}

impl Source<'_> {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rgba8(img) => img.rect,
            Self::Rgba64(img) => img.rect,
            Self::Gray8(img) => img.rect,
            Self::Gray16(img) => img.rect,
            Self::YCbCr(img) => img.rect,
            Self::Generic(raster) => raster.bounds(),
        }
    }

    /// Short name of the layout, for logging.
    #[must_use]
    pub const fn layout(&self) -> &'static str {
        match self {
            Self::Rgba8(_) => "rgba8",
            Self::Rgba64(_) => "rgba64",
            Self::Gray8(_) => "gray8",
            Self::Gray16(_) => "gray16",
            Self::YCbCr(_) => "ycbcr",
            Self::Generic(_) => "generic",
        }
    }
}
