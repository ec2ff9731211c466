#[cfg(target_arch = "x86_64")]
mod avx2;
mod rust;


use cfg_if::cfg_if;

use crate::util::Color;

/// Reduces a run of taps to one color: `sum(samples[i] * weights[i])`.
///
/// The weights are expected to be normalized already. Only the shorter of
/// the two slices is consumed.
#[must_use]
#[inline]
pub fn weighted_sum(samples: &[Color], weights: &[f32]) -> Color {
    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first
                return unsafe { avx2::weighted_sum(samples, weights) };
            }
        }
    }

    rust::weighted_sum(samples, weights)
}

/// Divides `weights` by their sum in place, returning the sum.
///
/// A window whose weights cancel out (possible only with degenerate kernels)
/// is left untouched so the result stays finite.
pub fn normalize(weights: &mut [f32]) -> f32 {
    let sum: f32 = weights.iter().sum();
    if sum != 0.0 {
        let inv = sum.recip();
        for w in weights.iter_mut() {
            *w *= inv;
        }
    }
    sum
}
