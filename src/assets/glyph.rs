use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::decode::PreparedImage,
    foundation::error::{PhotostripError, PhotostripResult},
};

const EMOJI_FAMILIES: &str =
    "'Noto Color Emoji', 'Apple Color Emoji', 'Segoe UI Emoji', 'Twemoji Mozilla', sans-serif";

/// Rasterizes text stickers through `usvg`/`resvg` using a shared font database.
#[derive(Clone)]
pub struct GlyphRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl GlyphRasterizer {
    /// System fonts plus any font files found directly in `extra_dirs`.
    pub fn with_system_fonts(extra_dirs: &[&Path]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            if dir.is_dir() {
                db.load_fonts_dir(dir);
            }
        }
        tracing::debug!(faces = db.len(), "sticker font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Render `text` centered in a `box_px` square, premultiplied RGBA8.
    ///
    /// Fails when nothing visible was produced (e.g. no installed font has the glyph).
    pub fn rasterize(&self, text: &str, box_px: u32) -> PhotostripResult<PreparedImage> {
        let box_px = box_px.max(1);
        let svg = glyph_svg(text, box_px);

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse sticker svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(box_px, box_px)
            .ok_or_else(|| PhotostripError::render("failed to allocate sticker pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        if pixmap.data().chunks_exact(4).all(|px| px[3] == 0) {
            return Err(PhotostripError::render(format!(
                "no installed font could draw '{text}'"
            )));
        }

        Ok(PreparedImage {
            width: box_px,
            height: box_px,
            rgba8_premul: Arc::new(pixmap.data().to_vec()),
        })
    }
}

fn glyph_svg(text: &str, box_px: u32) -> String {
    let half = f64::from(box_px) / 2.0;
    let font_size = f64::from(box_px) * 0.8;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{box_px}" height="{box_px}" viewBox="0 0 {box_px} {box_px}"><text x="{half}" y="{half}" font-size="{font_size}" font-family="{EMOJI_FAMILIES}" text-anchor="middle" dominant-baseline="central">{}</text></svg>"#,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/glyph.rs"]
mod tests;
