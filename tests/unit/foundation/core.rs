use super::*;

#[test]
fn hex_parsing_accepts_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::from_hex("#FFFFFF").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::from_hex("f00").unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(
        Rgba8::from_hex("#10203040").unwrap(),
        Rgba8 {
            r: 0x10,
            g: 0x20,
            b: 0x30,
            a: 0x40
        }
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
}

#[test]
fn hex_serde_round_trips_through_json() {
    let c = Rgba8::opaque(0x12, 0xab, 0x00);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#12ab00\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn premul_scales_color_by_alpha() {
    let c = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(c.to_premul(), [100, 50, 0, 128]);
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn canvas_buffer_len() {
    let c = Canvas {
        width: 3,
        height: 2,
    };
    assert_eq!(c.pixel_count(), 6);
    assert_eq!(c.rgba8_len(), 24);
}
