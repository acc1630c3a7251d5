use super::*;

fn glyph(s: &str) -> StickerContent {
    StickerContent::Glyph(s.to_string())
}

#[test]
fn catalogue_lookup_and_categories() {
    assert_eq!(STICKERS.len(), 20);
    assert_eq!(sticker_by_id("crown").unwrap().name, "Crown");
    assert!(sticker_by_id("nope").is_none());
    assert_eq!(stickers_in_category(None).count(), 20);
    assert_eq!(
        stickers_in_category(Some(StickerCategory::Symbols)).count(),
        6
    );
    assert!(
        stickers_in_category(Some(StickerCategory::Emotions))
            .all(|s| s.category == StickerCategory::Emotions)
    );
}

#[test]
fn added_stickers_get_increasing_z_and_center_defaults() {
    let board = StickerBoard::new();
    let (board, a) = board.with_added(glyph("a"));
    let (board, b) = board.with_added(glyph("b"));

    let pa = board.get(&a).unwrap();
    let pb = board.get(&b).unwrap();
    assert!(pb.z_index > pa.z_index);
    assert_eq!((pa.x, pa.y, pa.scale, pa.rotation_deg), (50.0, 50.0, 1.0, 0.0));
}

#[test]
fn removal_does_not_renumber() {
    let (board, a) = StickerBoard::new().with_added(glyph("a"));
    let (board, b) = board.with_added(glyph("b"));
    let (board, c) = board.with_added(glyph("c"));
    let z_c = board.get(&c).unwrap().z_index;

    let board = board.with_removed(&b);
    assert_eq!(board.len(), 2);
    assert_eq!(board.get(&c).unwrap().z_index, z_c);
    assert_eq!(board.get(&a).unwrap().z_index, 0);

    // New stickers still go on top of everything ever added.
    let (board, d) = board.with_added(glyph("d"));
    assert_eq!(board.get(&d).unwrap().z_index, z_c + 1);
}

#[test]
fn gestures_leave_previous_snapshots_untouched() {
    let (board, a) = StickerBoard::new().with_added(glyph("a"));
    let before = board.snapshot();
    let moved = board.with_moved(&a, 10.0, 120.0);

    assert_eq!(before[0].x, 50.0);
    assert_eq!(board.get(&a).unwrap().x, 50.0);
    let p = moved.get(&a).unwrap();
    assert_eq!((p.x, p.y), (10.0, 100.0));
}

#[test]
fn scale_and_rotation_are_normalized() {
    let (board, a) = StickerBoard::new().with_added(glyph("a"));
    let board = board.with_scaled(&a, 100.0).with_rotated(&a, -90.0);
    let p = board.get(&a).unwrap();
    assert_eq!(p.scale, STICKER_SCALE_RANGE.1);
    assert_eq!(p.rotation_deg, 270.0);

    let board = board.with_scaled(&a, f64::NAN);
    assert_eq!(board.get(&a).unwrap().scale, STICKER_SCALE_RANGE.1);
}

#[test]
fn non_finite_placements_are_flagged() {
    let mut p = StickerPlacement::from_catalogue("s", sticker_by_id("heart").unwrap(), 0);
    assert!(p.check_finite().is_ok());
    p.x = f64::INFINITY;
    assert!(p.check_finite().is_err());
    p.x = 1.0;
    p.scale = 0.0;
    assert!(p.check_finite().is_err());
}
