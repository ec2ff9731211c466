use super::*;

fn assert_close(actual: f32, expected: f32, epsilon: f32) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {} within {}, got {}",
        expected,
        epsilon,
        actual
    );
}

#[test]
fn transfer_curve_endpoints() {
    assert_close(srgb_to_linear(0.0), 0.0, 1e-7);
    assert_close(srgb_to_linear(1.0), 1.0, 1e-6);
    assert_close(linear_to_srgb(0.0), 0.0, 1e-7);
    assert_close(linear_to_srgb(1.0), 1.0, 1e-6);
}

#[test]
fn transfer_curve_mid_gray() {
    // 50% linear light encodes to roughly 188/255 in sRGB
    assert_close(linear_to_srgb(0.5) * 255.0, 187.5, 0.5);
    assert_close(srgb_to_linear(188.0 / 255.0), 0.5029, 1e-3);
}

#[test]
fn transfer_curve_round_trips() {
    for i in 0..=255u16 {
        let v = f32::from(i) / 255.0;
        assert_close(linear_to_srgb(srgb_to_linear(v)), v, 1e-5);
    }
}

#[test]
fn linear_to_srgb_saturates_out_of_range() {
    assert_close(linear_to_srgb(-0.25), 0.0, 1e-7);
    assert_close(linear_to_srgb(3.0), 1.0, 1e-6);
}

#[test]
fn table_matches_transfer_curve() {
    let table = LinearTable::new();
    for i in (0..=65535u16).step_by(257) {
        let v = f32::from(i);
        assert_close(table.lookup(v), srgb_to_linear(v / 65535.0), 1e-6);
    }
    assert_close(table.lookup(-10.0), 0.0, 1e-7);
    assert_close(table.lookup(70000.0), 1.0, 1e-6);
}

#[test]
fn transparent_sample_linearizes_to_zero() {
    let table = LinearTable::new();
    assert_eq!(table.to_linear([1000.0, 2000.0, 3000.0, 0.0]), [0.0; 4]);
    assert_eq!(from_linear([1000.0, 2000.0, 3000.0, 0.0]), [0.0; 4]);
}

#[test]
fn opaque_white_and_black_are_fixed_points() {
    let table = LinearTable::new();
    let white = [65535.0; 4];
    let black = [0.0, 0.0, 0.0, 65535.0];
    for c in [white, black] {
        let back = from_linear(table.to_linear(c));
        for i in 0..4 {
            assert_close(back[i], c[i], 0.05);
        }
    }
}

#[test]
fn linear_color_is_weighted_by_alpha() {
    // 50% alpha over straight white: premultiplied encoded 0.5 decodes to
    // straight 1.0, weighted back down to 0.5.
    let table = LinearTable::new();
    let c = table.to_linear([32767.5, 32767.5, 32767.5, 32767.5]);
    for v in c {
        assert_close(v, 32767.5, 0.5);
    }
}

#[test]
fn premultiplied_round_trip_keeps_color() {
    // 50% alpha, straight color 0.6 -> premultiplied 0.3
    let table = LinearTable::new();
    let c = [0.3 * 65535.0, 0.15 * 65535.0, 0.0, 0.5 * 65535.0];
    let linear = table.to_linear(c);
    assert_close(linear[3], c[3], 1e-3);
    let back = from_linear(linear);
    for i in 0..4 {
        assert_close(back[i], c[i], 1.0);
    }
}

#[test]
fn blending_with_transparent_keeps_straight_color() {
    let table = LinearTable::new();
    let white = table.to_linear([65535.0; 4]);
    let clear = table.to_linear([0.0; 4]);
    let mixed: Color = std::array::from_fn(|i| 0.25 * white[i] + 0.75 * clear[i]);
    let back = from_linear(mixed);
    assert_close(back[3], 0.25 * 65535.0, 0.05);
    for v in &back[..3] {
        assert_close(*v, back[3], 0.05);
    }
}
