use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&png_bytes(img), DecodeLimits::default()).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"definitely not an image", DecodeLimits::default()).is_err());
    assert!(decode_image(&[], DecodeLimits::default()).is_err());
}

#[test]
fn decode_rejects_truncated_png() {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([1, 2, 3, 255]));
    let bytes = png_bytes(img);
    assert!(decode_image(&bytes[..bytes.len() / 2], DecodeLimits::default()).is_err());
}

#[test]
fn decode_honors_dimension_limit() {
    let img = image::RgbaImage::from_pixel(32, 8, image::Rgba([1, 2, 3, 255]));
    let bytes = png_bytes(img);
    let tight = DecodeLimits {
        max_dimension: 16,
        ..DecodeLimits::default()
    };
    assert!(decode_image(&bytes, tight).is_err());
    assert_eq!(decode_image(&bytes, DecodeLimits::default()).unwrap().width, 32);
}

#[test]
fn transparent_pixels_premultiply_to_zero() {
    let mut px = vec![255u8, 255, 255, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 10, 20, 30, 255]);
}
