use super::*;

fn alpha_rows(buf: &PixelBuffer, x: u32) -> Vec<u8> {
    (0..buf.height())
        .map(|y| buf.pixel(x, y).unwrap()[3])
        .collect()
}

#[test]
fn grid_lights_every_cell_corner() {
    let buf = generate_pattern(PatternKind::grid(), 8, 8, 0).unwrap();
    let corners = [0u32, 3, 4, 7];
    for y in 0..8 {
        for x in 0..8 {
            let expected = if corners.contains(&x) && corners.contains(&y) {
                255
            } else {
                0
            };
            assert_eq!(buf.pixel(x, y).unwrap()[3], expected, "at ({x}, {y})");
        }
    }
    assert_eq!(buf.alpha_channel().filter(|&a| a == 255).count(), 16);
}

#[test]
fn grid_clips_partial_cells_at_right_and_bottom() {
    let buf = generate_pattern(PatternKind::grid(), 6, 6, 0).unwrap();
    assert_eq!(buf.alpha_channel().filter(|&a| a > 0).count(), 9);
    assert_eq!(buf.pixel(4, 4).unwrap()[3], 255);
    assert_eq!(buf.pixel(5, 5).unwrap()[3], 0);
}

#[test]
fn every_pattern_paints_white() {
    for kind in [
        PatternKind::grid(),
        PatternKind::stripe(),
        PatternKind::gradient_stripe(),
    ] {
        let buf = generate_pattern(kind, 7, 31, 5).unwrap();
        assert!(buf.pixels().all(|p| p[..3] == [255, 255, 255]));
    }
}

#[test]
fn flat_stripe_lights_first_rows_of_each_cell() {
    let buf = generate_pattern(PatternKind::stripe(), 3, 40, 0).unwrap();
    let mut expected = vec![0u8; 40];
    for y in [0, 1, 2, 3, 20, 21, 22, 23] {
        expected[y] = 255;
    }
    for x in 0..3 {
        assert_eq!(alpha_rows(&buf, x), expected);
    }
}

#[test]
fn gradient_stripe_fades_in_shrinking_bands() {
    let buf = generate_pattern(PatternKind::gradient_stripe(), 2, 20, 0).unwrap();
    let mut expected = vec![0u8; 20];
    expected[0..4].fill(255);
    expected[4..7].fill(191);
    expected[7..9].fill(128);
    expected[9] = 64;
    assert_eq!(alpha_rows(&buf, 0), expected);
    assert_eq!(alpha_rows(&buf, 1), expected);
}

#[test]
fn gradient_stops_when_alpha_runs_out() {
    let kind = PatternKind::GradientStripe {
        cell_height: 20,
        cell_width: 1,
        rows: 6,
    };
    let buf = generate_pattern(kind, 1, 20, 0).unwrap();
    let mut expected = vec![0u8; 20];
    expected[0..6].fill(255);
    expected[6..11].fill(191);
    expected[11..15].fill(128);
    expected[15..18].fill(64);
    assert_eq!(alpha_rows(&buf, 0), expected);
}

#[test]
fn gradient_bands_past_cell_bottom_are_dropped() {
    let kind = PatternKind::GradientStripe {
        cell_height: 5,
        cell_width: 1,
        rows: 4,
    };
    let buf = generate_pattern(kind, 1, 10, 0).unwrap();
    assert_eq!(
        alpha_rows(&buf, 0),
        vec![255, 255, 255, 255, 191, 255, 255, 255, 255, 191]
    );
}

#[test]
fn full_period_offset_wraps_to_zero() {
    for kind in [PatternKind::stripe(), PatternKind::gradient_stripe()] {
        let a = generate_pattern(kind, 6, 50, 0).unwrap();
        let b = generate_pattern(kind, 6, 50, 20).unwrap();
        let c = generate_pattern(kind, 6, 50, 40).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}

#[test]
fn offset_moves_the_tiling_origin_up() {
    let buf = generate_pattern(PatternKind::stripe(), 1, 40, 2).unwrap();
    let rows = alpha_rows(&buf, 0);
    // The cell cut by the top edge is skipped; the first full cell starts at 18.
    assert!(rows[0..18].iter().all(|&a| a == 0));
    assert_eq!(&rows[16..24], &[0, 0, 255, 255, 255, 255, 0, 0]);
    assert_eq!(&rows[36..40], &[0, 0, 255, 255]);
}

#[test]
fn gradient_offset_leaves_a_blank_band_above_the_first_cell() {
    let buf = generate_pattern(PatternKind::gradient_stripe(), 2, 30, 15).unwrap();
    let rows = alpha_rows(&buf, 0);
    assert!(rows[0..5].iter().all(|&a| a == 0));
    assert_eq!(&rows[5..15], &[255, 255, 255, 255, 191, 191, 191, 128, 128, 64]);
    assert!(rows[15..25].iter().all(|&a| a == 0));
    assert_eq!(&rows[25..30], &[255, 255, 255, 255, 191]);
}

#[test]
fn cells_larger_than_the_target_are_clipped() {
    let buf = generate_pattern(PatternKind::Grid { cell_size: 1 << 20 }, 4, 4, 0).unwrap();
    assert_eq!(buf.pixel(0, 0).unwrap()[3], 255);
    assert_eq!(buf.alpha_channel().filter(|&a| a > 0).count(), 1);

    let huge = PatternKind::GradientStripe {
        cell_height: u32::MAX,
        cell_width: u32::MAX,
        rows: u32::MAX,
    };
    let buf = generate_pattern(huge, 3, 5, 1).unwrap();
    assert!(buf.alpha_channel().all(|a| a == 0));
    let buf = generate_pattern(huge, 3, 5, 0).unwrap();
    assert!(buf.alpha_channel().all(|a| a == 255));
}

#[test]
fn unit_cell_reads_zero_outside_its_bounds() {
    let cell = UnitCell::build(PatternKind::grid()).unwrap();
    assert_eq!((cell.width(), cell.height()), (4, 4));
    assert_eq!(cell.alpha_at(3, 3), 255);
    assert_eq!(cell.alpha_at(4, 0), 0);
    assert_eq!(cell.alpha_at(0, 9), 0);
}

#[test]
fn descriptor_matches_free_function() {
    let d = PatternDescriptor {
        kind: PatternKind::gradient_stripe(),
        offset: 6,
    };
    assert_eq!(
        d.generate(4, 30).unwrap(),
        generate_pattern(d.kind, 4, 30, 6).unwrap()
    );
}

#[test]
fn degenerate_cells_give_transparent_overlay() {
    for kind in [
        PatternKind::Grid { cell_size: 0 },
        PatternKind::Stripe {
            cell_height: 0,
            cell_width: 2,
            rows: 4,
        },
        PatternKind::Stripe {
            cell_height: 20,
            cell_width: 2,
            rows: 0,
        },
        PatternKind::GradientStripe {
            cell_height: 20,
            cell_width: 0,
            rows: 4,
        },
    ] {
        let buf = generate_pattern(kind, 5, 5, 3).unwrap();
        assert!(buf.alpha_channel().all(|a| a == 0), "{kind:?}");
    }
}

#[test]
fn zero_area_target_is_empty() {
    let buf = generate_pattern(PatternKind::grid(), 0, 10, 0).unwrap();
    assert!(buf.is_empty());
}

#[test]
fn grid_of_one_pixel_cells_is_solid() {
    let buf = generate_pattern(PatternKind::Grid { cell_size: 1 }, 3, 3, 0).unwrap();
    assert!(buf.alpha_channel().all(|a| a == 255));
}

#[test]
fn parse_pattern_kind_accepts_aliases_and_defaults() {
    let k = parse_pattern_kind(" Grid ", &serde_json::Value::Null).unwrap();
    assert_eq!(k, PatternKind::grid());

    let k = parse_pattern_kind("strip", &serde_json::json!({ "rows": 2 })).unwrap();
    assert_eq!(
        k,
        PatternKind::Stripe {
            cell_height: 20,
            cell_width: 2,
            rows: 2
        }
    );

    let k = parse_pattern_kind("gradient-stripe", &serde_json::json!({})).unwrap();
    assert_eq!(k, PatternKind::gradient_stripe());
}

#[test]
fn parse_pattern_kind_rejects_bad_input() {
    assert!(parse_pattern_kind("", &serde_json::Value::Null).is_err());
    assert!(parse_pattern_kind("checker", &serde_json::Value::Null).is_err());
    assert!(parse_pattern_kind("grid", &serde_json::json!([1, 2])).is_err());
    assert!(parse_pattern_kind("grid", &serde_json::json!({ "cell_size": -1 })).is_err());
}

#[test]
fn serde_tagged_form_fills_defaults() {
    let k: PatternKind = serde_json::from_str(r#"{"kind": "grid"}"#).unwrap();
    assert_eq!(k, PatternKind::grid());
    let k: PatternKind =
        serde_json::from_str(r#"{"kind": "gradient_stripe", "cell_height": 10}"#).unwrap();
    assert_eq!(
        k,
        PatternKind::GradientStripe {
            cell_height: 10,
            cell_width: 2,
            rows: 4
        }
    );
}
