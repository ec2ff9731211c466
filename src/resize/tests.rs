#![allow(clippy::unwrap_used, reason = "allow in test files")]

use super::*;
use crate::{image::Gray16Image, params::ResizeFlags};

fn gray_ramp(width: usize, height: usize) -> Gray16Image {
    let mut img = Gray16Image::new(Rect::from_size(width, height));
    for y in 0..height {
        for x in 0..width {
            img.set_gray(x as i32, y as i32, ((x * 257 + y * 4111) % 65536) as u16);
        }
    }
    img
}

fn single_threaded() -> ResizeConfig {
    ResizeConfig::default()
        .with_threads(1)
        .unwrap()
        .with_flags(ResizeFlags::empty())
}

#[test]
fn negative_dimensions_are_rejected() {
    let err = Resize::new(Some(-1), None, Interpolation::Bilinear, ResizeConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("'width'"), "{err}");

    let err = Resize::new(Some(10), Some(-20), Interpolation::Bilinear, ResizeConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("-20"), "{err}");
}

#[test]
fn oversized_dimensions_are_rejected() {
    let err = Resize::new(
        Some((1 << 32) + 3),
        Some(2),
        Interpolation::Bilinear,
        ResizeConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("'width'"), "{err}");
    assert!(err.to_string().contains("4294967299"), "{err}");

    let too_tall = i64::from(i32::MAX) + 1;
    assert!(
        Resize::new(None, Some(too_tall), Interpolation::Bilinear, ResizeConfig::default())
            .is_err()
    );
    assert!(
        Resize::new(
            Some(i64::from(i32::MAX)),
            None,
            Interpolation::Bilinear,
            ResizeConfig::default()
        )
        .is_ok()
    );

    let src = gray_ramp(4, 4);
    assert!(resize(u32::MAX, 2, &src, Interpolation::Bilinear).is_err());
    assert!(crop(2, u32::MAX, &src, Interpolation::Bilinear, single_threaded()).is_err());
}

#[test]
fn zero_dimension_means_auto() {
    let a = Resize::new(Some(0), Some(10), Interpolation::Bicubic, ResizeConfig::default()).unwrap();
    let b = Resize::new(None, Some(10), Interpolation::Bicubic, ResizeConfig::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.interpolation(), Interpolation::Bicubic);
}

#[test]
fn empty_source_gives_empty_result() {
    let src = Gray16Image::new(Rect::default());
    let out = resize(10, 10, &src, Interpolation::Lanczos3).unwrap();
    assert!(out.rect.is_empty());
    assert!(out.pix.is_empty());
}

#[test]
fn identity_copies_and_rebases() {
    let full = gray_ramp(6, 5);
    let src = full.sub_image(Rect::new(2, 1, 5, 4));
    let out = resize(0, 0, &src, Interpolation::Lanczos3).unwrap();
    assert_eq!(out.rect, Rect::from_size(3, 3));
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(out.rgba_at(x, y), src.gray_at(x + 2, y + 1));
        }
    }
}

#[test]
fn rgba64_identity_is_exact_copy() {
    let mut src = Rgba64Image::new(Rect::from_size(3, 2));
    src.set(1, 1, [1, 2, 3, 4]);
    src.set(2, 0, [65535, 0, 65535, 65535]);
    let out = resize(0, 0, &src, Interpolation::NearestNeighbor).unwrap();
    assert_eq!(out, src);
}

#[test]
fn thread_count_does_not_change_output() {
    let src = gray_ramp(37, 23);
    let one = Resize::new(Some(17), Some(29), Interpolation::Lanczos3Lut, single_threaded())
        .unwrap()
        .apply(&src);
    let many = Resize::new(
        Some(17),
        Some(29),
        Interpolation::Lanczos3Lut,
        single_threaded().with_threads(8).unwrap(),
    )
    .unwrap()
    .apply(&src);
    assert_eq!(one, many);
}

#[test]
fn offset_source_is_sampled_from_its_own_origin() {
    let full = gray_ramp(8, 8);
    let sub = full.sub_image(Rect::new(4, 4, 8, 8));
    let mut rebased = Gray16Image::new(Rect::from_size(4, 4));
    for y in 0..4 {
        for x in 0..4 {
            rebased.set_gray(x, y, sub.gray_at(x + 4, y + 4)[0]);
        }
    }
    let resizer = Resize::new(Some(7), Some(3), Interpolation::Bicubic, single_threaded()).unwrap();
    assert_eq!(resizer.apply(&sub), resizer.apply(&rebased));
}

#[test]
fn crop_rejects_zero_size() {
    let src = gray_ramp(4, 4);
    assert!(crop(0, 4, &src, Interpolation::Bilinear, ResizeConfig::default()).is_err());
    assert!(crop(4, 0, &src, Interpolation::Bilinear, ResizeConfig::default()).is_err());
}

#[test]
fn crop_has_requested_size() {
    let src = gray_ramp(40, 20);
    for (w, h) in [(10, 10), (30, 5), (5, 30), (40, 20), (64, 64)] {
        let out = crop(w, h, &src, Interpolation::Bilinear, single_threaded()).unwrap();
        assert_eq!(out.rect, Rect::from_size(w as usize, h as usize));
    }
}

#[test]
fn crop_of_empty_source_is_blank() {
    let src = Gray16Image::new(Rect::default());
    let out = crop(3, 2, &src, Interpolation::Bilinear, ResizeConfig::default()).unwrap();
    assert_eq!(out.rect, Rect::from_size(3, 2));
    assert!(out.pix.iter().all(|&v| v == 0));
}

#[test]
fn crop_takes_centered_window() {
    // 6x2 source scaled by 1 keeps its width; the window is columns 2..4.
    let src = gray_ramp(6, 2);
    let out = crop(2, 2, &src, Interpolation::NearestNeighbor, single_threaded()).unwrap();
    let scaled = Resize::new(Some(6), Some(2), Interpolation::NearestNeighbor, single_threaded())
        .unwrap()
        .apply(&src);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(out.rgba_at(x, y), scaled.rgba_at(x + 2, y));
        }
    }
}

#[test]
fn cover_never_undershoots() {
    assert_eq!(cover(20, 2.0, 10), 10);
    assert_eq!(cover(21, 2.0, 10), 10);
    assert_eq!(cover(30, 3.0000001, 10), 10);
}
