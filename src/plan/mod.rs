
use std::num::NonZeroUsize;

use crate::image::MAX_DIMENSION;

/// Geometry of one resize: destination size and the mapping from
/// destination pixel indices to continuous source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub width: usize,
    pub height: usize,
    /// Source pixels per destination pixel.
    pub scale_x: f32,
    pub scale_y: f32,
    /// Offset, in destination pixels, that centers the sample grid.
    pub adjust_x: f32,
    pub adjust_y: f32,
}

impl Plan {
    /// Plans a resize of an `old_width x old_height` source.
    ///
    /// A missing dimension is derived from the other one so the aspect ratio
    /// is kept; with both missing the plan is the identity.
    #[must_use]
    pub fn new(
        old_width: usize,
        old_height: usize,
        width: Option<NonZeroUsize>,
        height: Option<NonZeroUsize>,
    ) -> Self {
        let (scale_x, scale_y) = scale_factors(old_width, old_height, width, height);
        let width = width.map_or_else(|| derived_size(old_width, scale_x), NonZeroUsize::get);
        let height = height.map_or_else(|| derived_size(old_height, scale_y), NonZeroUsize::get);
        Self {
            width,
            height,
            scale_x,
            scale_y,
            adjust_x: alignment(old_width, width, scale_x),
            adjust_y: alignment(old_height, height, scale_y),
        }
    }

    /// Source column sampled by destination column `x`, relative to the
    /// source origin.
    #[must_use]
    #[inline]
    pub fn source_x(&self, x: usize) -> f32 {
        self.scale_x * (x as f32 + self.adjust_x)
    }

    /// Source row sampled by destination row `y`, relative to the source
    /// origin.
    #[must_use]
    #[inline]
    pub fn source_y(&self, y: usize) -> f32 {
        self.scale_y * (y as f32 + self.adjust_y)
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0 && self.adjust_x == 0.0 && self.adjust_y == 0.0
    }
}

/// Source-to-destination ratio per axis.
#[must_use]
pub fn scale_factors(
    old_width: usize,
    old_height: usize,
    width: Option<NonZeroUsize>,
    height: Option<NonZeroUsize>,
) -> (f32, f32) {
    let ratio = |old: usize, new: NonZeroUsize| old as f32 / new.get() as f32;
    match (width, height) {
        (None, None) => (1.0, 1.0),
        (None, Some(h)) => {
            let s = ratio(old_height, h);
            (s, s)
        }
        (Some(w), None) => {
            let s = ratio(old_width, w);
            (s, s)
        }
        (Some(w), Some(h)) => (ratio(old_width, w), ratio(old_height, h)),
    }
}

/// Destination size for an axis whose size was left to the planner,
/// rounded to nearest. A non-empty source never plans an empty axis.
#[must_use]
fn derived_size(old: usize, scale: f32) -> usize {
    if old == 0 || scale.is_nan() || scale <= 0.0 {
        return 0;
    }
    ((old as f32 / scale + 0.5) as usize).clamp(1, MAX_DIMENSION)
}

/// Shift that places the first and last destination samples symmetrically
/// inside the source extent.
#[must_use]
fn alignment(old: usize, new: usize, scale: f32) -> f32 {
    if old == 0 || new == 0 || scale == 0.0 {
        return 0.0;
    }
    0.5 * ((old as f32 - 1.0) / scale - (new as f32 - 1.0))
}
