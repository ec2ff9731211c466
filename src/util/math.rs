
/// Saturates a convolution result into the 16-bit sample range, rounding to nearest.
///
/// Ringing kernels (Lanczos, Catmull-Rom) overshoot near hard edges,
/// so negative and too-large values are expected here, not exceptional.
#[must_use]
#[inline]
pub fn clamp_u16(x: f32) -> u16 {
    if x.is_nan() || x <= 0.0 {
        0
    } else if x >= f32::from(u16::MAX) {
        u16::MAX
    } else {
        (x + 0.5) as u16
    }
}

/// Same as [`clamp_u16`], for 8-bit output.
#[must_use]
#[inline]
pub fn clamp_u8(x: f32) -> u8 {
    if x.is_nan() || x <= 0.0 {
        0
    } else if x >= f32::from(u8::MAX) {
        u8::MAX
    } else {
        (x + 0.5) as u8
    }
}

/// Clamps a coordinate into `[min, max)`, repeating the edge sample outward.
///
/// `max` must be greater than `min`.
#[must_use]
#[inline]
pub fn replicate_border(x: isize, min: isize, max: isize) -> isize {
    debug_assert!(max > min);
    if x < min {
        min
    } else if x >= max {
        max - 1
    } else {
        x
    }
}
