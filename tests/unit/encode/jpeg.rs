use super::*;
use crate::foundation::core::Canvas;

fn surface(w: u32, h: u32, px: [u8; 4]) -> Surface {
    Surface {
        canvas: Canvas {
            width: w,
            height: h,
        },
        rgba8_premul: px.repeat((w * h) as usize),
    }
}

#[test]
fn quality_is_clamped_into_unit_interval() {
    assert_eq!(jpeg_quality(0.92), 92);
    assert_eq!(jpeg_quality(1.7), 100);
    assert_eq!(jpeg_quality(0.0), 1);
    assert_eq!(jpeg_quality(-3.0), 1);
    assert_eq!(jpeg_quality(f32::NAN), 95);
    assert_eq!(clamp_quality(f32::INFINITY), 1.0);
}

#[test]
fn encodes_decodable_jpeg_with_reported_size() {
    let s = surface(16, 8, [200, 30, 40, 255]);
    let out = encode_jpeg(&s, Rgba8::WHITE, 0.9).unwrap();
    assert_eq!(out.byte_size, out.bytes.len());
    assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]);

    let img = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (16, 8));
    let p = img.get_pixel(8, 4);
    assert!((i32::from(p[0]) - 200).abs() <= 12);
    assert!((i32::from(p[1]) - 30).abs() <= 12);
}

#[test]
fn zero_sized_surface_fails_to_encode() {
    let err = encode_jpeg(&surface(0, 4, [0; 4]), Rgba8::WHITE, 0.9).unwrap_err();
    assert!(matches!(err, PhotostripError::EncodeFailed(_)));
}

#[test]
fn mismatched_buffer_fails_to_encode() {
    let mut s = surface(2, 2, [0, 0, 0, 255]);
    s.rgba8_premul.pop();
    assert!(matches!(
        encode_jpeg(&s, Rgba8::WHITE, 0.9),
        Err(PhotostripError::EncodeFailed(_))
    ));
}

#[test]
fn transparent_pixels_take_the_background() {
    let s = surface(8, 8, [0, 0, 0, 0]);
    let out = encode_jpeg(&s, Rgba8::opaque(0, 0, 255), 1.0).unwrap();
    let img = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
    let p = img.get_pixel(4, 4);
    assert!(p[2] > 240 && p[0] < 15);
}

#[test]
fn sizes_are_labelled_like_the_export_screen() {
    assert_eq!(human_size(0), "0 Bytes");
    assert_eq!(human_size(512), "512.00 Bytes");
    assert_eq!(human_size(1536), "1.50 KB");
    assert_eq!(human_size(3 * 1024 * 1024 / 2), "1.50 MB");
    assert_eq!(human_size(5 * 1024 * 1024 * 1024), "5.00 GB");
}
