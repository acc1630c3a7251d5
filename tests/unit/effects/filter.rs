use super::*;

fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
}

fn solid(px: [u8; 4], n: usize) -> PreparedImage {
    PreparedImage {
        width: n as u32,
        height: 1,
        rgba8_premul: Arc::new(px.repeat(n)),
    }
}

#[test]
fn catalogue_has_all_filters() {
    let ids: Vec<_> = FILTERS.iter().map(|f| f.id).collect();
    assert_eq!(
        ids,
        ["none", "bw", "vintage", "vivid", "cool", "warm", "fade", "dramatic"]
    );
}

#[test]
fn unknown_id_falls_back_to_identity() {
    let f = filter_by_id("does-not-exist");
    assert_eq!(f, FilterSpec::identity());
    assert!(f.is_identity());
}

#[test]
fn catalogue_css_round_trips_through_parser() {
    let vintage = filter_by_id("vintage");
    assert_eq!(vintage.to_css(), "sepia(50%) contrast(110%) brightness(105%)");
    let parsed = FilterSpec::parse_css("vintage", &vintage.to_css()).unwrap();
    for (a, b) in parsed.ops.iter().zip(vintage.ops.iter()) {
        match (a, b) {
            (ColorOp::Sepia(x), ColorOp::Sepia(y))
            | (ColorOp::Contrast(x), ColorOp::Contrast(y))
            | (ColorOp::Brightness(x), ColorOp::Brightness(y)) => assert!((x - y).abs() < 1e-6),
            other => panic!("op mismatch {other:?}"),
        }
    }
}

#[test]
fn parser_accepts_numbers_units_and_none() {
    let f = FilterSpec::parse_css("x", "grayscale(1) hue-rotate(0.5turn) saturate(150%)").unwrap();
    assert_eq!(
        f.ops,
        vec![
            ColorOp::Grayscale(1.0),
            ColorOp::HueRotate(180.0),
            ColorOp::Saturate(1.5)
        ]
    );
    assert!(FilterSpec::parse_css("x", "none").unwrap().ops.is_empty());
    assert_eq!(
        FilterSpec::parse_css("x", "sepia(250%)").unwrap().ops,
        vec![ColorOp::Sepia(1.0)]
    );
}

#[test]
fn parser_rejects_garbage() {
    for css in ["blur(4px)", "sepia(", "contrast(-1)", "brightness(abc)", "hue-rotate(5)"] {
        let err = FilterSpec::parse_css("x", css).unwrap_err();
        assert!(
            err.to_string().starts_with("validation error"),
            "{css}: {err}"
        );
    }
}

#[test]
fn grayscale_uses_luminance_weights() {
    let f = filter_by_id("bw");
    let out = f.apply_rgb([1.0, 0.0, 0.0]);
    assert!(approx(out, [0.2126, 0.2126, 0.2126]));
}

#[test]
fn ops_apply_in_order_with_clamping() {
    // brightness then contrast clips at 1.0 before contrast runs
    let a = FilterSpec {
        id: "a".into(),
        ops: vec![ColorOp::Brightness(3.0), ColorOp::Contrast(0.5)],
    };
    let b = FilterSpec {
        id: "b".into(),
        ops: vec![ColorOp::Contrast(0.5), ColorOp::Brightness(3.0)],
    };
    assert!(approx(a.apply_rgb([0.5, 0.5, 0.5]), [0.75, 0.75, 0.75]));
    assert!(approx(b.apply_rgb([0.5, 0.5, 0.5]), [1.0, 1.0, 1.0]));
}

#[test]
fn full_hue_turn_is_identity() {
    let f = FilterSpec {
        id: "h".into(),
        ops: vec![ColorOp::HueRotate(360.0)],
    };
    assert!(f.is_identity());
    assert!(approx(f.apply_rgb([0.2, 0.4, 0.6]), [0.2, 0.4, 0.6]));
}

#[test]
fn identity_shares_pixel_buffer() {
    let img = solid([10, 20, 30, 255], 8);
    let out = FilterSpec::identity().apply_to_image(&img);
    assert!(Arc::ptr_eq(&img.rgba8_premul, &out.rgba8_premul));
}

#[test]
fn filter_runs_over_every_pixel_and_keeps_alpha() {
    let img = solid([200, 50, 50, 255], PARALLEL_CHUNK_PX + 3);
    let out = filter_by_id("bw").apply_to_image(&img);
    assert_eq!(out.rgba8_premul.len(), img.rgba8_premul.len());
    for px in out.rgba8_premul.chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn premultiplied_pixels_stay_premultiplied() {
    let img = solid([100, 0, 0, 128], 1);
    let out = filter_by_id("bw").apply_to_image(&img);
    let px = &out.rgba8_premul[..];
    assert_eq!(px[3], 128);
    assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3]);

    let clear = solid([0, 0, 0, 0], 1);
    let out = filter_by_id("vivid").apply_to_image(&clear);
    assert_eq!(&out.rgba8_premul[..], &[0, 0, 0, 0]);
}
