//! Minimal raster types the resizer reads from and writes to.
//!
//! Decoding and encoding live elsewhere; these types only describe sample
//! storage well enough to give the resizer fast, format-specific access.


mod ycbcr;

use std::num::NonZeroUsize;

use anyhow::{Result, bail};

pub use ycbcr::{SubsampleRatio, YCbCrImage, ycbcr_to_rgb};

use crate::{source::Source, util::Pixel};

/// Largest width or height a [`Rect`] can describe.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Half-open pixel rectangle `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Normalizes swapped corners so `min <= max` on both axes.
    #[must_use]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Sizes past [`MAX_DIMENSION`] saturate; callers validate first.
    #[must_use]
    pub fn from_size(width: usize, height: usize) -> Self {
        let clamp = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(width), clamp(height))
    }

    /// Zero for a rect whose corners are swapped.
    #[must_use]
    pub const fn width(&self) -> usize {
        if self.max_x <= self.min_x {
            return 0;
        }
        self.max_x.abs_diff(self.min_x) as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        if self.max_y <= self.min_y {
            return 0;
        }
        self.max_y.abs_diff(self.min_y) as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// The overlap of both rectangles, or an empty rectangle.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let r = Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        if r.is_empty() { Self::default() } else { r }
    }
}

/// Read access to a two-dimensional raster.
///
/// This is the generic interface every source image can offer. Formats with
/// a dedicated fast path override [`Raster::source`] to expose their storage
/// directly so the resizer never goes through [`Raster::rgba64`] per tap.
pub trait Raster: Sync {
    #[must_use]
    fn bounds(&self) -> Rect;

    /// Alpha-premultiplied 16-bit RGBA at `(x, y)`, which must lie in bounds.
    #[must_use]
    fn rgba64(&self, x: i32, y: i32) -> [u16; 4];

    /// The sampling path for this raster.
    #[must_use]
    fn source(&self) -> Source<'_>
    where
        Self: Sized,
    {
        Source::Generic(self)
    }
}

/// Interleaved samples, `CHANNELS` per pixel, rows `stride` samples apart.
///
/// Four-channel images are RGBA with premultiplied alpha; single-channel
/// images are gray (luma) and always opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedImage<T: Pixel, const CHANNELS: usize> {
    pub pix: Vec<T>,
    pub stride: NonZeroUsize,
    pub rect: Rect,
}

pub type Rgba8Image = PackedImage<u8, 4>;
pub type Rgba64Image = PackedImage<u16, 4>;
pub type Gray8Image = PackedImage<u8, 1>;
pub type Gray16Image = PackedImage<u16, 1>;

impl<T: Pixel, const CHANNELS: usize> PackedImage<T, CHANNELS> {
    /// A zero-filled image covering `rect`.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        let stride = CHANNELS * rect.width();
        Self {
            pix: vec![T::default(); stride * rect.height()],
            stride: NonZeroUsize::new(stride).unwrap_or(NonZeroUsize::MIN),
            rect,
        }
    }

    /// Wraps existing storage, checking that it covers `rect` at `stride`.
    pub fn from_raw(pix: Vec<T>, stride: usize, rect: Rect) -> Result<Self> {
        let row = CHANNELS * rect.width();
        if stride < row {
            bail!("Stride {stride} is too small for rows of {row} samples.");
        }
        let stride = NonZeroUsize::new(stride).unwrap_or(NonZeroUsize::MIN);
        let needed = if rect.is_empty() {
            0
        } else {
            stride.get() * (rect.height() - 1) + row
        };
        if pix.len() < needed {
            bail!(
                "Buffer of {} samples is too short for a {}x{} image with stride {}, need {needed}.",
                pix.len(),
                rect.width(),
                rect.height(),
                stride
            );
        }
        Ok(Self { pix, stride, rect })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.rect.width()
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.rect.height()
    }

    /// Index of the first sample of `(x, y)` in [`PackedImage::pix`].
    #[must_use]
    #[inline]
    pub const fn pix_offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min_y) as usize * self.stride.get()
            + (x - self.rect.min_x) as usize * CHANNELS
    }

    /// A view of the region `r` that keeps the original coordinates.
    ///
    /// The returned image owns a copy of the storage.
    #[must_use]
    pub fn sub_image(&self, r: Rect) -> Self {
        let r = r.intersect(&self.rect);
        if r.is_empty() {
            return Self {
                pix: Vec::new(),
                stride: self.stride,
                rect: r,
            };
        }
        let start = self.pix_offset(r.min_x, r.min_y);
        let end = self.pix_offset(r.max_x - 1, r.max_y - 1) + CHANNELS;
        Self {
            pix: self.pix[start..end].to_vec(),
            stride: self.stride,
            rect: r,
        }
    }
}

impl<T: Pixel> PackedImage<T, 4> {
    /// Premultiplied 16-bit RGBA at `(x, y)`, which must lie in bounds.
    #[must_use]
    #[inline]
    pub fn rgba_at(&self, x: i32, y: i32) -> [u16; 4] {
        let i = self.pix_offset(x, y);
        let p = &self.pix[i..i + 4];
        [p[0].to_u16(), p[1].to_u16(), p[2].to_u16(), p[3].to_u16()]
    }

    /// Stores a premultiplied 16-bit color, narrowing to the sample type.
    pub fn set(&mut self, x: i32, y: i32, c: [u16; 4]) {
        if !self.rect.contains(x, y) {
            return;
        }
        let i = self.pix_offset(x, y);
        for (dst, v) in self.pix[i..i + 4].iter_mut().zip(c) {
            *dst = T::from_u16(v);
        }
    }
}

impl<T: Pixel> PackedImage<T, 1> {
    /// The gray level at `(x, y)` expanded to opaque 16-bit RGBA.
    #[must_use]
    #[inline]
    pub fn gray_at(&self, x: i32, y: i32) -> [u16; 4] {
        let g = self.pix[self.pix_offset(x, y)].to_u16();
        [g, g, g, u16::MAX]
    }

    /// Stores a gray level given at 16-bit precision.
    pub fn set_gray(&mut self, x: i32, y: i32, gray: u16) {
        if !self.rect.contains(x, y) {
            return;
        }
        let i = self.pix_offset(x, y);
        self.pix[i] = T::from_u16(gray);
    }
}

macro_rules! impl_raster {
    ($ty:ty, $variant:ident, $at:ident) => {
        impl Raster for $ty {
            fn bounds(&self) -> Rect {
                self.rect
            }

            fn rgba64(&self, x: i32, y: i32) -> [u16; 4] {
                self.$at(x, y)
            }

            fn source(&self) -> Source<'_> {
                Source::$variant(self)
            }
        }
    };
}

impl_raster!(Rgba8Image, Rgba8, rgba_at);
impl_raster!(Rgba64Image, Rgba64, rgba_at);
impl_raster!(Gray8Image, Gray8, gray_at);
impl_raster!(Gray16Image, Gray16, gray_at);
