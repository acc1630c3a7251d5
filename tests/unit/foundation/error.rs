use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PhotostripError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PhotostripError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PhotostripError::encode("x")
            .to_string()
            .contains("encode failed:")
    );
    assert!(
        PhotostripError::unsupported_layout("5x5")
            .to_string()
            .contains("'5x5'")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PhotostripError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn incomplete_set_message_counts_remaining_photos() {
    let one = PhotostripError::IncompletePhotoSet {
        expected: 4,
        provided: 3,
    };
    assert_eq!(one.user_message(), "Capture 1 more photo before exporting.");

    let many = PhotostripError::IncompletePhotoSet {
        expected: 9,
        provided: 2,
    };
    assert_eq!(many.user_message(), "Capture 7 more photos before exporting.");
}

#[test]
fn photo_warning_message_is_one_based() {
    let w = CompositionWarning::PhotoDecodeFailed {
        index: 2,
        reason: "bad header".to_string(),
    };
    assert!(w.user_message().starts_with("Photo 3 "));
    assert!(w.to_string().contains("photo 2"));
}

#[test]
fn warnings_serialize_with_kind_tag() {
    let w = CompositionWarning::FrameDecodeFailed {
        path: "frames/polaroid/2x2.png".to_string(),
        reason: "missing".to_string(),
    };
    let v = serde_json::to_value(&w).unwrap();
    assert_eq!(v["kind"], "frame_decode_failed");
    assert_eq!(v["path"], "frames/polaroid/2x2.png");
}
