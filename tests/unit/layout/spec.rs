use super::*;

#[test]
fn builtin_layouts_resolve_by_id() {
    let l = LayoutSpec::by_id("1x4").unwrap();
    assert_eq!((l.rows, l.cols), (4, 1));
    assert_eq!(l.total(), 4);
    assert_eq!(LayoutSpec::by_id("3x3").unwrap().total(), 9);
    assert!(LayoutSpec::by_id("4x4").is_none());
}

#[test]
fn default_layout_is_2x2() {
    let l = LayoutSpec::default_layout();
    assert_eq!(l.id, "2x2");
    assert_eq!(l.total(), 4);
}

#[test]
fn empty_grids_are_rejected() {
    assert!(LayoutSpec::new("0x2", 0, 2).is_err());
    assert!(LayoutSpec::new("2x0", 2, 0).is_err());
    assert!(LayoutSpec::new(" ", 1, 1).is_err());
    assert!(LayoutSpec::new("1x1", 1, 1).is_ok());
}
