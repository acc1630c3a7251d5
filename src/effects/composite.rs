//! Premultiplied RGBA8 blending helpers shared by the encoder and tests.

use crate::foundation::{
    core::Rgba8,
    error::{PhotostripError, PhotostripResult},
};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a premultiplied RGBA8 surface over an opaque `background` and drop alpha.
///
/// JPEG has no alpha channel, so any translucent pixel left on the canvas is resolved
/// against the background color here.
pub fn flatten_to_rgb8(rgba8_premul: &[u8], background: Rgba8) -> PhotostripResult<Vec<u8>> {
    if !rgba8_premul.len().is_multiple_of(4) {
        return Err(PhotostripError::encode(
            "flatten expects an rgba8 buffer (length multiple of 4)",
        ));
    }
    let bg = Rgba8 { a: 255, ..background }.to_premul();
    let mut rgb = Vec::with_capacity(rgba8_premul.len() / 4 * 3);
    for px in rgba8_premul.chunks_exact(4) {
        let out = if px[3] == 255 {
            [px[0], px[1], px[2], 255]
        } else {
            over(bg, [px[0], px[1], px[2], px[3]])
        };
        rgb.extend_from_slice(&out[..3]);
    }
    Ok(rgb)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
