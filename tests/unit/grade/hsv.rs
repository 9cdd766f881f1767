use super::*;

#[test]
fn primaries_convert_to_half_degree_hues() {
    assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
    assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
    assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
    assert_eq!(rgb_to_hsv([255, 0, 255]), [150, 255, 255]);
}

#[test]
fn grays_have_zero_hue_and_saturation() {
    for v in [0u8, 1, 128, 255] {
        assert_eq!(rgb_to_hsv([v, v, v]), [0, 0, v]);
        assert_eq!(hsv_to_rgb([0, 0, v]), [v, v, v]);
    }
}

#[test]
fn mixed_color_survives_roundtrip() {
    let rgb = [200, 100, 50];
    let hsv = rgb_to_hsv(rgb);
    assert_eq!(hsv, [10, 191, 200]);
    assert_eq!(hsv_to_rgb(hsv), rgb);
}

#[test]
fn hue_shift_rotates_red_to_green() {
    let buf = PixelBuffer::filled(1, 1, [255, 0, 0, 200]).unwrap();
    let out = shift_hue(buf, 60);
    assert_eq!(out.pixel(0, 0), Some([0, 255, 0, 200]));
}

#[test]
fn hue_shift_saturates_instead_of_wrapping() {
    let buf = PixelBuffer::filled(1, 1, [0, 0, 255, 255]).unwrap();
    let out = shift_hue(buf, 80);
    let [r, g, b] = hsv_to_rgb([HUE_MAX, 255, 255]);
    assert_eq!(out.pixel(0, 0), Some([r, g, b, 255]));
}

#[test]
fn full_desaturation_yields_gray_at_value() {
    let buf = PixelBuffer::filled(2, 1, [200, 100, 50, 9]).unwrap();
    let out = shift_saturation(buf, -255);
    assert!(out.pixels().all(|p| p == [200, 200, 200, 9]));
}

#[test]
fn grayscale_input_is_stable_under_default_grade_shift() {
    let buf = PixelBuffer::filled(3, 3, [90, 90, 90, 255]).unwrap();
    let out = shift_hsv(
        buf.clone(),
        HsvShift {
            hue: 80,
            saturation: -80,
            value: 0,
        },
    );
    assert_eq!(out, buf);
}

#[test]
fn value_shift_clamps() {
    let buf = PixelBuffer::filled(1, 1, [250, 250, 250, 255]).unwrap();
    let out = shift_hsv(
        buf,
        HsvShift {
            value: 30,
            ..HsvShift::default()
        },
    );
    assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn extreme_shifts_clamp_every_channel() {
    let blue = PixelBuffer::filled(1, 1, [0, 0, 255, 255]).unwrap();
    let [r, g, b] = hsv_to_rgb([HUE_MAX, 255, 255]);
    assert_eq!(
        shift_hue(blue.clone(), i32::MAX).pixel(0, 0),
        Some([r, g, b, 255])
    );
    assert_eq!(
        shift_hue(blue, i32::MIN).pixel(0, 0),
        Some([255, 0, 0, 255])
    );

    let buf = PixelBuffer::filled(1, 1, [200, 100, 50, 9]).unwrap();
    let out = shift_hsv(
        buf,
        HsvShift {
            hue: 0,
            saturation: i32::MIN,
            value: i32::MAX,
        },
    );
    assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 9]));
}
