#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use anyhow::{Result, bail};
use log::{debug, trace};

use crate::{
    dispatch::{bands, run_bands},
    filter::Filter,
    image::{MAX_DIMENSION, Raster, Rect, Rgba64Image},
    kernel::{LutKernel, Weights},
    params::{Interpolation, ResizeConfig},
    plan::Plan,
    source::{GenericSampler, Sampler, Source},
    util::{bitblt, color::LinearTable, math::clamp_u16},
};

/// Samples per destination pixel.
const CHANNELS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(3);

/// A configured resize, reusable across many source images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    width: Option<NonZeroUsize>,
    height: Option<NonZeroUsize>,
    interp: Interpolation,
    config: ResizeConfig,
}

impl Resize {
    /// `None` or `0` for a dimension derives it from the other one, keeping
    /// the source aspect ratio. Leaving both out copies the source unscaled.
    pub fn new(
        width: Option<i64>,
        height: Option<i64>,
        interp: Interpolation,
        config: ResizeConfig,
    ) -> Result<Self> {
        Ok(Self {
            width: dimension("width", width)?,
            height: dimension("height", height)?,
            interp,
            config,
        })
    }

    #[must_use]
    pub const fn interpolation(&self) -> Interpolation {
        self.interp
    }

    #[must_use]
    pub const fn config(&self) -> ResizeConfig {
        self.config
    }

    /// Resamples `src` into a new 16-bit RGBA image anchored at the origin.
    #[must_use]
    pub fn apply<R: Raster>(&self, src: &R) -> Rgba64Image {
        self.apply_source(src.source())
    }

    /// Like [`Resize::apply`], for a source whose layout is already known or
    /// a raster behind a trait object.
    #[must_use]
    pub fn apply_source(&self, src: Source<'_>) -> Rgba64Image {
        let bounds = src.bounds();
        if bounds.is_empty() {
            debug!("{} source is empty, nothing to resize", src.layout());
            return Rgba64Image::new(Rect::default());
        }

        let plan = Plan::new(bounds.width(), bounds.height(), self.width, self.height);
        if plan.is_identity() {
            debug!(
                "copying {}x{} {} source unscaled",
                bounds.width(),
                bounds.height(),
                src.layout()
            );
            return match src {
                Source::Rgba64(img) => copy_rgba64(img),
                Source::Rgba8(img) => copy_pixels(img),
                Source::Gray8(img) => copy_pixels(img),
                Source::Gray16(img) => copy_pixels(img),
                Source::YCbCr(img) => copy_pixels(img),
                Source::Generic(raster) => copy_pixels(&GenericSampler(raster)),
            };
        }

        let kernel = self.interp.kernel();
        debug!(
            "{} {}x{} -> {}x{}: scale {:.4}x{:.4}, adjust {:.4}/{:.4}, taps {}x{}, {} bands, {}{}",
            src.layout(),
            bounds.width(),
            bounds.height(),
            plan.width,
            plan.height,
            plan.scale_x,
            plan.scale_y,
            plan.adjust_x,
            plan.adjust_y,
            kernel.taps(plan.scale_x),
            kernel.taps(plan.scale_y),
            bands(plan.height, self.config.threads).len(),
            self.interp,
            if self.config.linear_light() {
                ", linear light"
            } else {
                ""
            }
        );

        match src {
            Source::Rgba8(img) => self.resample(img, &plan),
            Source::Rgba64(img) => self.resample(img, &plan),
            Source::Gray8(img) => self.resample(img, &plan),
            Source::Gray16(img) => self.resample(img, &plan),
            Source::YCbCr(img) => self.resample(img, &plan),
            Source::Generic(raster) => self.resample(&GenericSampler(raster), &plan),
        }
    }

    fn resample<S: Sampler>(&self, sampler: &S, plan: &Plan) -> Rgba64Image {
        let kernel = self.interp.kernel();
        if self.interp.uses_lut() {
            convolve_image(sampler, &LutKernel::new(&kernel), plan, self.config)
        } else {
            convolve_image(sampler, &kernel, plan, self.config)
        }
    }
}

/// Resizes `src` with the default configuration.
///
/// A zero `width` or `height` is derived from the other dimension so the
/// aspect ratio is kept; both zero returns an unscaled copy.
pub fn resize<R: Raster>(
    width: u32,
    height: u32,
    src: &R,
    interp: Interpolation,
) -> Result<Rgba64Image> {
    let resize = Resize::new(
        Some(i64::from(width)),
        Some(i64::from(height)),
        interp,
        ResizeConfig::default(),
    )?;
    Ok(resize.apply(src))
}

/// Scales `src` to cover `width x height`, then cuts the centered window of
/// exactly that size out of it.
pub fn crop<R: Raster>(
    width: u32,
    height: u32,
    src: &R,
    interp: Interpolation,
    config: ResizeConfig,
) -> Result<Rgba64Image> {
    let (Some(target_w), Some(target_h)) = (
        NonZeroUsize::new(width as usize),
        NonZeroUsize::new(height as usize),
    ) else {
        bail!("Invalid crop size {width}x{height}, both dimensions must be at least 1.");
    };
    if target_w.get() > MAX_DIMENSION || target_h.get() > MAX_DIMENSION {
        bail!("Invalid crop size {width}x{height}, dimensions must be at most {MAX_DIMENSION}.");
    }

    let mut dst = Rgba64Image::new(Rect::from_size(target_w.get(), target_h.get()));
    let bounds = src.bounds();
    if bounds.is_empty() {
        return Ok(dst);
    }

    let rx = bounds.width() as f64 / target_w.get() as f64;
    let ry = bounds.height() as f64 / target_h.get() as f64;
    let (scaled_w, scaled_h) = if rx < ry {
        (target_w.get(), cover(bounds.height(), rx, target_h.get()))
    } else {
        (cover(bounds.width(), ry, target_w.get()), target_h.get())
    };

    let scaled = Resize {
        width: NonZeroUsize::new(scaled_w),
        height: NonZeroUsize::new(scaled_h),
        interp,
        config,
    }
    .apply(src);

    let off_x = (scaled_w - target_w.get()) / 2;
    let off_y = (scaled_h - target_h.get()) / 2;
    let start = scaled.pix_offset(off_x as i32, off_y as i32);
    debug!("cropping {width}x{height} at ({off_x}, {off_y}) out of {scaled_w}x{scaled_h}");

    bitblt(
        &mut dst.pix,
        dst.stride,
        &scaled.pix[start..],
        scaled.stride,
        target_w.saturating_mul(CHANNELS),
        target_h,
    );
    Ok(dst)
}

fn dimension(name: &str, value: Option<i64>) -> Result<Option<NonZeroUsize>> {
    match value {
        None => Ok(None),
        Some(v) if v < 0 => {
            bail!("Invalid value for '{name}', must be 0 or greater, got {v}.")
        }
        Some(v) if v > MAX_DIMENSION as i64 => {
            bail!("Invalid value for '{name}', must be at most {MAX_DIMENSION}, got {v}.")
        }
        Some(v) => Ok(NonZeroUsize::new(usize::try_from(v)?)),
    }
}

/// Length of an axis scaled by `1 / ratio`, never shorter than `target`.
fn cover(old: usize, ratio: f64, target: usize) -> usize {
    ((old as f64 / ratio) as usize).clamp(target, MAX_DIMENSION.max(target))
}

/// Evaluates every destination pixel of `plan`, one filter per row band.
fn convolve_image<S: Sampler, K: Weights>(
    sampler: &S,
    kernel: &K,
    plan: &Plan,
    config: ResizeConfig,
) -> Rgba64Image {
    let bounds = sampler.bounds();
    let origin_x = bounds.min_x as f32;
    let origin_y = bounds.min_y as f32;
    let table = config.linear_light().then(LinearTable::new);
    let row_len = 4 * plan.width;

    let mut dst = Rgba64Image::new(Rect::from_size(plan.width, plan.height));
    run_bands(&mut dst.pix, row_len, config.threads, |rows, band| {
        let mut filter = Filter::new(
            sampler,
            kernel,
            plan.scale_x,
            plan.scale_y,
            table.as_ref(),
        );
        let (taps_x, taps_y) = filter.taps();
        trace!("rows {}..{}: {taps_x}x{taps_y} taps", rows.start, rows.end);
        for (y, out) in rows.zip(band.chunks_exact_mut(row_len)) {
            let v = origin_y + plan.source_y(y);
            for (x, px) in out.chunks_exact_mut(4).enumerate() {
                let u = origin_x + plan.source_x(x);
                px.copy_from_slice(&filter.interpolate(u, v));
            }
        }
    });
    dst
}

fn copy_rgba64(img: &Rgba64Image) -> Rgba64Image {
    let mut dst = Rgba64Image::new(Rect::from_size(img.width(), img.height()));
    if let (Some(row), Some(height)) = (
        NonZeroUsize::new(4 * img.width()),
        NonZeroUsize::new(img.height()),
    ) {
        bitblt(&mut dst.pix, dst.stride, &img.pix, img.stride, row, height);
    }
    dst
}

fn copy_pixels<S: Sampler>(sampler: &S) -> Rgba64Image {
    let bounds = sampler.bounds();
    let mut dst = Rgba64Image::new(Rect::from_size(bounds.width(), bounds.height()));
    for (y, sy) in (bounds.min_y..bounds.max_y).enumerate() {
        for (x, sx) in (bounds.min_x..bounds.max_x).enumerate() {
            let c = sampler.sample(sx as isize, sy as isize);
            dst.set(x as i32, y as i32, c.map(clamp_u16));
        }
    }
    dst
}
