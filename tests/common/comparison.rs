use resample::{Raster, Rgba64Image};

/// The largest per-channel difference found between two images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDifference {
    pub x: i32,
    pub y: i32,
    pub channel: usize,
    pub expected: u16,
    pub actual: u16,
}

impl PixelDifference {
    pub fn magnitude(&self) -> u16 {
        self.expected.abs_diff(self.actual)
    }
}

/// Compares `actual` against any raster of the same size, pixel by pixel.
///
/// Returns the worst channel difference, or `None` if the images match.
pub fn compare_images<R: Raster>(expected: &R, actual: &Rgba64Image) -> Option<PixelDifference> {
    let eb = expected.bounds();
    assert_eq!(
        (eb.width(), eb.height()),
        (actual.width(), actual.height()),
        "image sizes differ"
    );

    let mut worst: Option<PixelDifference> = None;
    for y in 0..eb.height() as i32 {
        for x in 0..eb.width() as i32 {
            let e = expected.rgba64(eb.min_x + x, eb.min_y + y);
            let a = actual.rgba_at(actual.rect.min_x + x, actual.rect.min_y + y);
            for channel in 0..4 {
                let diff = PixelDifference {
                    x,
                    y,
                    channel,
                    expected: e[channel],
                    actual: a[channel],
                };
                if diff.magnitude() > 0
                    && worst.is_none_or(|w| diff.magnitude() > w.magnitude())
                {
                    worst = Some(diff);
                }
            }
        }
    }
    worst
}

/// Panics if any channel differs by more than `tolerance` 16-bit steps.
pub fn assert_images_close<R: Raster>(expected: &R, actual: &Rgba64Image, tolerance: u16) {
    if let Some(diff) = compare_images(expected, actual) {
        assert!(
            diff.magnitude() <= tolerance,
            "images differ by {} (tolerance {}): {:?}",
            diff.magnitude(),
            tolerance,
            diff
        );
    }
}
