use std::io::Cursor;

use image::ImageEncoder;

use crate::{
    effects::composite::flatten_to_rgb8,
    foundation::{
        core::Rgba8,
        error::{PhotostripError, PhotostripResult},
    },
    render::surface::Surface,
};

/// Quality used when the caller passes something that is not a number.
pub const DEFAULT_QUALITY: f32 = 0.95;

/// Encoded output plus its length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub byte_size: usize,
}

/// Clamp a requested quality into `(0, 1]`.
pub fn clamp_quality(quality: f32) -> f32 {
    if quality.is_nan() {
        return DEFAULT_QUALITY;
    }
    quality.clamp(0.01, 1.0)
}

/// Map `(0, 1]` onto the encoder's `1..=100` scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    (clamp_quality(quality) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a premultiplied surface as baseline JPEG.
///
/// Translucent pixels are resolved against `background` first.
#[tracing::instrument(skip_all, fields(width = surface.canvas.width, height = surface.canvas.height))]
pub fn encode_jpeg(
    surface: &Surface,
    background: Rgba8,
    quality: f32,
) -> PhotostripResult<EncodedImage> {
    let canvas = surface.canvas;
    if canvas.width == 0 || canvas.height == 0 {
        return Err(PhotostripError::encode(format!(
            "cannot encode a {}x{} surface",
            canvas.width, canvas.height
        )));
    }
    if surface.rgba8_premul.len() != canvas.rgba8_len() {
        return Err(PhotostripError::encode(
            "surface byte length does not match its canvas",
        ));
    }

    let rgb = flatten_to_rgb8(&surface.rgba8_premul, background)?;
    let q = jpeg_quality(quality);

    let mut bytes = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut bytes), q);
    encoder
        .write_image(
            &rgb,
            canvas.width,
            canvas.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PhotostripError::encode(format!("jpeg encoder: {e}")))?;

    let byte_size = bytes.len();
    tracing::debug!(byte_size, quality = q, "encoded jpeg");
    Ok(EncodedImage { bytes, byte_size })
}

/// Size label as shown on the export screen: two decimals, 1024-based units.
pub fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
