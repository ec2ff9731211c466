
use smallvec::SmallVec;

use crate::{
    convolve::{normalize, weighted_sum},
    kernel::Weights,
    source::Sampler,
    util::{
        Color,
        color::{LinearTable, from_linear},
        math::clamp_u16,
    },
};

/// Inline capacity for tap buffers; covers Lanczos3 up to a 2x reduction.
const INLINE_TAPS: usize = 12;

/// One worker's separable convolution state.
///
/// Binds a kernel to per-axis stretch factors and a source. The tap buffers
/// are reused for every pixel the worker evaluates, so an instance must not
/// be shared between threads.
pub struct Filter<'a, S: Sampler, K: Weights> {
    sampler: &'a S,
    kernel: &'a K,
    factor_x: f32,
    factor_y: f32,
    linear: Option<&'a LinearTable>,
    row: SmallVec<[Color; INLINE_TAPS]>,
    column: SmallVec<[Color; INLINE_TAPS]>,
    weights_x: SmallVec<[f32; INLINE_TAPS]>,
    weights_y: SmallVec<[f32; INLINE_TAPS]>,
}

impl<'a, S: Sampler, K: Weights> Filter<'a, S, K> {
    /// `scale_x`/`scale_y` are source pixels per destination pixel. Scales
    /// above 1 stretch the kernel, which low-pass filters the source before
    /// it is decimated; upsampling keeps the kernel at its natural width.
    ///
    /// With a `linear` table, taps are blended in linear light.
    #[must_use]
    pub fn new(
        sampler: &'a S,
        kernel: &'a K,
        scale_x: f32,
        scale_y: f32,
        linear: Option<&'a LinearTable>,
    ) -> Self {
        let factor_x = scale_x.max(1.0);
        let factor_y = scale_y.max(1.0);
        let taps_x = kernel.taps(factor_x);
        let taps_y = kernel.taps(factor_y);
        Self {
            sampler,
            kernel,
            factor_x,
            factor_y,
            linear,
            row: SmallVec::from_elem([0.0; 4], taps_x),
            column: SmallVec::from_elem([0.0; 4], taps_y),
            weights_x: SmallVec::from_elem(0.0, taps_x),
            weights_y: SmallVec::from_elem(0.0, taps_y),
        }
    }

    #[must_use]
    pub fn taps(&self) -> (usize, usize) {
        (self.weights_x.len(), self.weights_y.len())
    }

    /// Evaluates the reconstructed source at the continuous point `(u, v)`,
    /// given in source pixel coordinates.
    pub fn interpolate(&mut self, u: f32, v: f32) -> [u16; 4] {
        let Self {
            sampler,
            kernel,
            factor_x,
            factor_y,
            linear,
            row,
            column,
            weights_x,
            weights_y,
        } = self;

        let start_x = window_start(u, weights_x.len());
        let start_y = window_start(v, weights_y.len());
        fill_weights(*kernel, *factor_x, u, start_x, weights_x);
        fill_weights(*kernel, *factor_y, v, start_y, weights_y);

        for (i, reduced) in column.iter_mut().enumerate() {
            let y = start_y + i as isize;
            for (j, tap) in row.iter_mut().enumerate() {
                let c = sampler.sample(start_x + j as isize, y);
                *tap = match linear {
                    Some(table) => table.to_linear(c),
                    None => c,
                };
            }
            *reduced = weighted_sum(row, weights_x);
        }

        let mut c = weighted_sum(column, weights_y);
        if linear.is_some() {
            c = from_linear(c);
        }
        c.map(clamp_u16)
    }
}

/// First source index of a `taps`-wide window centered on `pos`.
#[must_use]
#[inline]
pub fn window_start(pos: f32, taps: usize) -> isize {
    pos.floor() as isize - (taps / 2) as isize + 1
}

/// Kernel weights for the window starting at `start`, normalized to sum to 1.
#[inline]
fn fill_weights<K: Weights>(kernel: &K, factor: f32, pos: f32, start: isize, weights: &mut [f32]) {
    for (j, w) in weights.iter_mut().enumerate() {
        let d = pos - (start + j as isize) as f32;
        *w = kernel.weight(d / factor);
    }
    normalize(weights);
}
