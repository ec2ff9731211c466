#![allow(clippy::undocumented_unsafe_blocks)]

use std::arch::x86_64::*;

use crate::util::Color;

/// Two taps per iteration: each 256-bit lane pair holds one RGBA sample,
/// multiplied by its broadcast weight.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn weighted_sum(samples: &[Color], weights: &[f32]) -> Color {
    let len = samples.len().min(weights.len());
    let src = samples.as_ptr() as *const f32;

    let mut acc = _mm256_setzero_ps();
    let mut i = 0;
    while i + 1 < len {
        // Colors are `[f32; 4]`, so taps `i` and `i + 1` are 8 contiguous floats.
        let s = _mm256_loadu_ps(src.add(i * 4));
        let w = _mm256_set_m128(_mm_set1_ps(weights[i + 1]), _mm_set1_ps(weights[i]));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(s, w));
        i += 2;
    }

    let mut sum = _mm_add_ps(_mm256_castps256_ps128(acc), _mm256_extractf128_ps::<1>(acc));
    if i < len {
        let s = _mm_loadu_ps(src.add(i * 4));
        sum = _mm_add_ps(sum, _mm_mul_ps(s, _mm_set1_ps(weights[i])));
    }

    let mut out = [0.0f32; 4];
    _mm_storeu_ps(out.as_mut_ptr(), sum);
    out
}
