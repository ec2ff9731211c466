use crate::util::Color;

pub(super) fn weighted_sum(samples: &[Color], weights: &[f32]) -> Color {
    let mut acc = [0.0f32; 4];
    for (s, &w) in samples.iter().zip(weights) {
        acc[0] += s[0] * w;
        acc[1] += s[1] * w;
        acc[2] += s[2] * w;
        acc[3] += s[3] * w;
    }
    acc
}
