use super::*;

#[test]
fn over_opaque_replaces_dst() {
    let dst = [10, 20, 30, 255];
    let src = [200, 100, 50, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_transparent_keeps_dst() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_translucent_src_keeps_part_of_dst() {
    let out = over([0, 0, 200, 255], [100, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 100);
    assert!((i32::from(out[2]) - 100).abs() <= 1);
}

#[test]
fn over_half_alpha_blends() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 128).abs() <= 1);
}

#[test]
fn flatten_resolves_alpha_against_background() {
    let bg = Rgba8::opaque(255, 0, 0);
    let buf = [0, 0, 255, 255, 0, 0, 0, 0, 0, 0, 128, 128];
    let rgb = flatten_to_rgb8(&buf, bg).unwrap();
    assert_eq!(rgb.len(), 9);
    assert_eq!(&rgb[0..3], &[0, 0, 255]);
    assert_eq!(&rgb[3..6], &[255, 0, 0]);
    assert!((i32::from(rgb[6]) - 127).abs() <= 1);
    assert!((i32::from(rgb[8]) - 128).abs() <= 1);
}

#[test]
fn flatten_rejects_ragged_buffers() {
    assert!(flatten_to_rgb8(&[1, 2, 3], Rgba8::WHITE).is_err());
}
