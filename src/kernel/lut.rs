use super::Weights;

/// Table entries per unit of kernel radius.
const SAMPLES_PER_UNIT: usize = 256;

/// A kernel evaluated by linear interpolation over a precomputed table.
///
/// Built once per resize call and shared read-only by every worker. Trades a
/// small interpolation error for skipping the transcendental math per tap.
#[derive(Debug, Clone)]
pub struct LutKernel {
    table: Vec<f32>,
    radius: f32,
    scale: f32,
}

impl LutKernel {
    /// Samples `kernel` over `[0, radius]`.
    ///
    /// The kernel must be symmetric, since only the non-negative half is stored.
    #[must_use]
    pub fn new<K: Weights>(kernel: &K) -> Self {
        let radius = kernel.radius();
        let table_size = (radius.ceil() as usize).max(1) * SAMPLES_PER_UNIT;
        let table = (0..=table_size)
            .map(|i| kernel.weight(i as f32 * radius / table_size as f32))
            .collect();
        Self {
            table,
            radius,
            scale: table_size as f32 / radius,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Weights for LutKernel {
    #[inline]
    fn weight(&self, x: f32) -> f32 {
        let pos = x.abs() * self.scale;
        let index = pos as usize;
        if index >= self.table.len().saturating_sub(1) {
            return 0.0;
        }
        let frac = pos - index as f32;
        let a = self.table[index];
        let b = self.table[index + 1];
        (b - a).mul_add(frac, a)
    }

    #[inline]
    fn radius(&self) -> f32 {
        self.radius
    }
}
