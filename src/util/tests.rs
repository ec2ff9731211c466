#![allow(clippy::unwrap_used, reason = "allow in test files")]

use super::*;

#[test]
fn widen_u8_replicates_high_byte() {
    assert_eq!(0u8.to_u16(), 0);
    assert_eq!(1u8.to_u16(), 0x0101);
    assert_eq!(0x80u8.to_u16(), 0x8080);
    assert_eq!(255u8.to_u16(), u16::MAX);
}

#[test]
fn widen_u16_is_identity() {
    assert_eq!(0u16.to_u16(), 0);
    assert_eq!(12345u16.to_u16(), 12345);
    assert_eq!(u16::MAX.to_u16(), u16::MAX);
}

#[test]
fn narrow_keeps_high_byte() {
    assert_eq!(u8::from_u16(0xff00), 0xff);
    assert_eq!(u8::from_u16(0x80ff), 0x80);
    assert_eq!(u8::from_u16(0x00ff), 0);
    assert_eq!(u16::from_u16(0xbeef), 0xbeef);
}

#[test]
fn widen_then_narrow_is_lossless_for_u8() {
    for v in 0..=255u8 {
        assert_eq!(u8::from_u16(v.to_u16()), v);
    }
}

#[test]
fn bitblt_same_stride() {
    let src = vec![1u16, 2, 3, 4, 5, 6, 7, 8, 9];
    let mut dest = vec![0u16; 9];
    let stride = NonZeroUsize::new(3).unwrap();
    let height = NonZeroUsize::new(3).unwrap();

    bitblt(&mut dest, stride, &src, stride, stride, height);

    assert_eq!(dest, src);
}

#[test]
fn bitblt_window_out_of_wider_source() {
    // Pull the middle 2 samples of each 5-wide row
    let src = vec![
        0u8, 1, 2, 0, 0, //
        0, 3, 4, 0, 0, //
    ];
    let mut dest = vec![9u8; 6];
    let src_stride = NonZeroUsize::new(5).unwrap();
    let dest_stride = NonZeroUsize::new(3).unwrap();
    let row_size = NonZeroUsize::new(2).unwrap();
    let height = NonZeroUsize::new(2).unwrap();

    bitblt(&mut dest, dest_stride, &src[1..], src_stride, row_size, height);

    assert_eq!(dest, vec![1, 2, 9, 3, 4, 9]);
}
