use anyhow::{Result, bail};

use super::{Raster, Rect};
use crate::source::Source;

/// Chroma subsampling of a [`YCbCrImage`], named after the J:a:b notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsampleRatio {
    /// Full resolution chroma.
    R444,
    /// Half horizontal chroma resolution.
    R422,
    /// Half horizontal and half vertical chroma resolution.
    R420,
    /// Half vertical chroma resolution.
    R440,
    /// Quarter horizontal chroma resolution.
    R411,
    /// Quarter horizontal and half vertical chroma resolution.
    R410,
}

impl SubsampleRatio {
    /// Size of each chroma plane for an image covering `r`.
    #[must_use]
    pub const fn chroma_size(self, r: &Rect) -> (usize, usize) {
        let w = r.width();
        let h = r.height();
        let half_w = (((r.max_x + 1) >> 1) - (r.min_x >> 1)) as usize;
        let quarter_w = (((r.max_x + 3) >> 2) - (r.min_x >> 2)) as usize;
        let half_h = (((r.max_y + 1) >> 1) - (r.min_y >> 1)) as usize;
        match self {
            Self::R444 => (w, h),
            Self::R422 => (half_w, h),
            Self::R420 => (half_w, half_h),
            Self::R440 => (w, half_h),
            Self::R411 => (quarter_w, h),
            Self::R410 => (quarter_w, half_h),
        }
    }

    /// Horizontal and vertical chroma decimation as right shifts.
    const fn shifts(self) -> (u32, u32) {
        match self {
            Self::R444 => (0, 0),
            Self::R422 => (1, 0),
            Self::R420 => (1, 1),
            Self::R440 => (0, 1),
            Self::R411 => (2, 0),
            Self::R410 => (2, 1),
        }
    }
}

/// Planar 8-bit Y'CbCr with subsampled chroma planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YCbCrImage {
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub y_stride: usize,
    pub c_stride: usize,
    pub ratio: SubsampleRatio,
    pub rect: Rect,
}

impl YCbCrImage {
    /// A zero-filled image covering `rect`.
    #[must_use]
    pub fn new(rect: Rect, ratio: SubsampleRatio) -> Self {
        let (cw, ch) = ratio.chroma_size(&rect);
        let w = rect.width();
        let h = rect.height();
        Self {
            y: vec![0; w * h],
            cb: vec![0; cw * ch],
            cr: vec![0; cw * ch],
            y_stride: w,
            c_stride: cw,
            ratio,
            rect,
        }
    }

    /// Wraps existing planes, checking each covers `rect` at its stride.
    pub fn from_planes(
        y: Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>,
        y_stride: usize,
        c_stride: usize,
        ratio: SubsampleRatio,
        rect: Rect,
    ) -> Result<Self> {
        let (cw, ch) = ratio.chroma_size(&rect);
        if y_stride < rect.width() || c_stride < cw {
            bail!(
                "Strides {y_stride}/{c_stride} are too small for a {}x{} {ratio:?} image.",
                rect.width(),
                rect.height()
            );
        }
        if !rect.is_empty() {
            let y_needed = y_stride * (rect.height() - 1) + rect.width();
            let c_needed = c_stride * (ch - 1) + cw;
            if y.len() < y_needed {
                bail!("Luma plane has {} samples, need {y_needed}.", y.len());
            }
            if cb.len() < c_needed || cr.len() < c_needed {
                bail!(
                    "Chroma planes have {}/{} samples, need {c_needed}.",
                    cb.len(),
                    cr.len()
                );
            }
        }
        Ok(Self {
            y,
            cb,
            cr,
            y_stride,
            c_stride,
            ratio,
            rect,
        })
    }

    /// Index of the luma sample for `(x, y)`.
    #[must_use]
    #[inline]
    pub const fn y_offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min_y) as usize * self.y_stride + (x - self.rect.min_x) as usize
    }

    /// Index of the chroma samples covering `(x, y)`.
    #[must_use]
    #[inline]
    pub const fn c_offset(&self, x: i32, y: i32) -> usize {
        let (sx, sy) = self.ratio.shifts();
        let row = (y >> sy) - (self.rect.min_y >> sy);
        let col = (x >> sx) - (self.rect.min_x >> sx);
        row as usize * self.c_stride + col as usize
    }

    /// A view of the region `r` that keeps the original coordinates.
    ///
    /// The returned image owns a copy of the planes from the region's first
    /// sample onward.
    #[must_use]
    pub fn sub_image(&self, r: Rect) -> Self {
        let r = r.intersect(&self.rect);
        if r.is_empty() {
            return Self {
                y: Vec::new(),
                cb: Vec::new(),
                cr: Vec::new(),
                y_stride: self.y_stride,
                c_stride: self.c_stride,
                ratio: self.ratio,
                rect: r,
            };
        }
        let yi = self.y_offset(r.min_x, r.min_y);
        let ci = self.c_offset(r.min_x, r.min_y);
        Self {
            y: self.y[yi..].to_vec(),
            cb: self.cb[ci..].to_vec(),
            cr: self.cr[ci..].to_vec(),
            y_stride: self.y_stride,
            c_stride: self.c_stride,
            ratio: self.ratio,
            rect: r,
        }
    }

    /// 8-bit RGB at `(x, y)`, which must lie in bounds.
    #[must_use]
    #[inline]
    pub fn rgb_at(&self, x: i32, y: i32) -> [u8; 3] {
        let yi = self.y_offset(x, y);
        let ci = self.c_offset(x, y);
        ycbcr_to_rgb(self.y[yi], self.cb[ci], self.cr[ci])
    }
}

impl Raster for YCbCrImage {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn rgba64(&self, x: i32, y: i32) -> [u16; 4] {
        let [r, g, b] = self.rgb_at(x, y);
        [
            u16::from(r) * 0x101,
            u16::from(g) * 0x101,
            u16::from(b) * 0x101,
            u16::MAX,
        ]
    }

    fn source(&self) -> Source<'_> {
        Source::YCbCr(self)
    }
}

/// Full-range JFIF Y'CbCr to 8-bit RGB, in 16.16 fixed point.
#[must_use]
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let yy = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let r = yy + 91881 * cr;
    let g = yy - 22554 * cb - 46802 * cr;
    let b = yy + 116130 * cb;

    [
        (r >> 16).clamp(0, 255) as u8,
        (g >> 16).clamp(0, 255) as u8,
        (b >> 16).clamp(0, 255) as u8,
    ]
}
