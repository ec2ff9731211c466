use resample::{Gray16Image, Rect, Rgba8Image};

/// Opaque black and white squares of `cell` pixels, white in the top left.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> Rgba8Image {
    let mut img = Rgba8Image::new(Rect::from_size(width, height));
    for y in 0..height {
        for x in 0..width {
            let v = if (x / cell + y / cell) % 2 == 0 { 0xffff } else { 0 };
            img.set(x as i32, y as i32, [v, v, v, 0xffff]);
        }
    }
    img
}

pub fn uniform_rgba8(width: usize, height: usize, color: [u8; 4]) -> Rgba8Image {
    let mut img = Rgba8Image::new(Rect::from_size(width, height));
    for px in img.pix.chunks_exact_mut(4) {
        px.copy_from_slice(&color);
    }
    img
}

/// A black 16-bit gray image with a single white pixel at `marked`.
pub fn gray16(width: usize, height: usize, marked: (i32, i32)) -> Gray16Image {
    let mut img = Gray16Image::new(Rect::from_size(width, height));
    img.set_gray(marked.0, marked.1, 0xffff);
    img
}
