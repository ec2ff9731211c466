//! sRGB transfer curve and the conversions between premultiplied encoded
//! samples and premultiplied linear light used by gamma-correct resizing.

#[cfg(test)]
mod tests;

use super::Color;

const SAMPLE_MAX: f32 = 65535.0;

/// Converts an sRGB-encoded value (0-1) to linear light.
#[must_use]
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a linear-light value (0-1) back to sRGB encoding.
#[must_use]
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.04045 / 12.92 {
        linear.max(0.0) * 12.92
    } else {
        1.055 * linear.min(1.0).powf(1.0 / 2.4) - 0.055
    }
}

/// Entries in [`LinearTable`], one per 16-bit encoded value.
const TABLE_SIZE: usize = 1 << 16;

/// Decodes 16-bit sRGB values to linear light by table lookup.
///
/// Built once per resize call and shared read-only by every worker, so each
/// tap costs a lookup instead of a `powf` per channel.
#[derive(Debug, Clone)]
pub struct LinearTable {
    table: Box<[f32]>,
}

impl LinearTable {
    #[must_use]
    pub fn new() -> Self {
        let table = (0..TABLE_SIZE)
            .map(|i| srgb_to_linear(i as f32 / SAMPLE_MAX))
            .collect();
        Self { table }
    }

    /// Linear light for a straight-alpha encoded value in 16-bit units.
    #[must_use]
    #[inline]
    pub fn lookup(&self, encoded: f32) -> f32 {
        let index = (encoded.clamp(0.0, SAMPLE_MAX) + 0.5) as usize;
        self.table[index.min(TABLE_SIZE - 1)]
    }

    /// Turns a premultiplied, sRGB-encoded sample into premultiplied linear
    /// light.
    ///
    /// Color is un-premultiplied before decoding and re-weighted by alpha
    /// afterwards, so transparent taps add nothing to the color sums.
    #[must_use]
    #[inline]
    pub fn to_linear(&self, c: Color) -> Color {
        let alpha = c[3];
        if alpha <= 0.0 {
            return [0.0; 4];
        }
        let mut out = [0.0, 0.0, 0.0, alpha];
        for i in 0..3 {
            out[i] = self.lookup(c[i] / alpha * SAMPLE_MAX) * alpha;
        }
        out
    }
}

impl Default for LinearTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverse of [`LinearTable::to_linear`]: divides out the summed alpha,
/// re-encodes, then re-multiplies by alpha.
#[must_use]
#[inline]
pub fn from_linear(c: Color) -> Color {
    let alpha = c[3].min(SAMPLE_MAX);
    if alpha <= 0.0 {
        return [0.0; 4];
    }
    let mut out = [0.0, 0.0, 0.0, alpha];
    for i in 0..3 {
        out[i] = linear_to_srgb(c[i] / c[3]) * alpha;
    }
    out
}
