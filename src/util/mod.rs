#[cfg(test)]
mod tests;

pub mod color;
pub mod math;

use std::num::NonZeroUsize;

#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_avx2, "avx2");

#[cfg(target_arch = "x86_64")]
pub use cpuid_avx2::get as has_avx2;

/// A premultiplied RGBA sample in 16-bit units (0.0 to 65535.0 per channel),
/// or premultiplied linear light while a gamma-correct pass is running.
pub type Color = [f32; 4];

/// A single stored sample of a raster plane.
///
/// Every sample type can be widened to the full 16-bit range without bias,
/// so 8-bit and 16-bit sources feed the same convolution path.
pub trait Pixel: Clone + Copy + Default + PartialEq + Send + Sync + Into<u32> + 'static {
    #[must_use]
    fn to_u16(self) -> u16;

    #[must_use]
    fn from_u16(value: u16) -> Self;
}

impl Pixel for u8 {
    #[inline]
    fn to_u16(self) -> u16 {
        (u16::from(self) << 8) | u16::from(self)
    }

    #[inline]
    fn from_u16(value: u16) -> Self {
        (value >> 8) as u8
    }
}

impl Pixel for u16 {
    #[inline]
    fn to_u16(self) -> u16 {
        self
    }

    #[inline]
    fn from_u16(value: u16) -> Self {
        value
    }
}

/// Copies `height` rows of `row_size` samples between two strided buffers.
pub fn bitblt<T: Pixel>(
    dest: &mut [T],
    dest_stride: NonZeroUsize,
    src: &[T],
    src_stride: NonZeroUsize,
    row_size: NonZeroUsize,
    height: NonZeroUsize,
) {
    let height = height.get();
    let row_size = row_size.get();
    let src_stride = src_stride.get();
    let dest_stride = dest_stride.get();

    if src_stride == dest_stride && src_stride == row_size {
        // Fast path: single copy when strides match row size
        dest[..row_size * height].copy_from_slice(&src[..row_size * height]);
    } else {
        for i in 0..height {
            let src_start = i * src_stride;
            let dest_start = i * dest_stride;
            dest[dest_start..dest_start + row_size]
                .copy_from_slice(&src[src_start..src_start + row_size]);
        }
    }
}
