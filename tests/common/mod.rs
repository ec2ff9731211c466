pub mod comparison;
pub mod fixtures;

pub use comparison::{PixelDifference, assert_images_close, compare_images};
pub use fixtures::{checkerboard, gray16, uniform_rgba8};
