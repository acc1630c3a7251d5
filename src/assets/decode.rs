use std::{io::Cursor, sync::Arc};

use anyhow::Context;
use image::ImageDecoder as _;

use crate::foundation::error::PhotostripResult;

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Upper bounds applied to every decode. Inputs beyond them fail like corrupt data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Max width or height in pixels.
    pub max_dimension: u32,
    /// Max bytes the decoder may allocate.
    pub max_alloc_bytes: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_dimension: 16_384,
            max_alloc_bytes: 1 << 30,
        }
    }
}

impl DecodeLimits {
    fn to_image_limits(self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        limits.max_alloc = Some(self.max_alloc_bytes);
        limits
    }
}

/// Decode any format `image` recognizes, honoring EXIF orientation.
pub fn decode_image(bytes: &[u8], limits: DecodeLimits) -> PhotostripResult<PreparedImage> {
    let mut reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?;
    reader.limits(limits.to_image_limits());

    let mut decoder = reader.into_decoder().context("open image decoder")?;
    let orientation = decoder.orientation().context("read image orientation")?;
    let mut dyn_img =
        image::DynamicImage::from_decoder(decoder).context("decode image from memory")?;
    dyn_img.apply_orientation(orientation);

    Ok(prepare_rgba8(dyn_img.to_rgba8()))
}

/// Wrap a straight-alpha RGBA8 buffer as a [`PreparedImage`].
pub fn prepare_rgba8(rgba: image::RgbaImage) -> PreparedImage {
    let (width, height) = rgba.dimensions();
    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
