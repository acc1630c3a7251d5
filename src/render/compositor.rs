use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::{
    assets::{
        decode::PreparedImage,
        glyph::GlyphRasterizer,
        stickers::{StickerContent, StickerPlacement},
    },
    effects::filter::FilterSpec,
    foundation::{
        core::{Affine, Canvas, Rect, Rgba8},
        error::{CompositionWarning, PhotostripError, PhotostripResult},
    },
    layout::{cover::cover_fit, geometry::ResolvedGeometry},
    render::surface::{
        Surface, affine_to_cpu, color_paint, image_paint, rect_to_cpu, surface_size,
    },
};

/// Lifecycle of one composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    Idle,
    GeometryResolved,
    AssetsLoading,
    Drawing,
    Encoded,
    Failed,
}

impl RenderStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Encoded | Self::Failed)
    }

    fn can_advance_to(self, next: Self) -> bool {
        use RenderStage::*;
        match (self, next) {
            (s, Failed) => !s.is_terminal(),
            (Idle, GeometryResolved)
            | (GeometryResolved, AssetsLoading)
            | (AssetsLoading, Drawing)
            | (Drawing, Encoded) => true,
            _ => false,
        }
    }
}

/// Tracks and logs the stage of one composition.
#[derive(Debug)]
pub(crate) struct StageTracker {
    stage: RenderStage,
    layout_id: String,
}

impl StageTracker {
    pub(crate) fn new(layout_id: &str) -> Self {
        Self {
            stage: RenderStage::Idle,
            layout_id: layout_id.to_string(),
        }
    }

    pub(crate) fn stage(&self) -> RenderStage {
        self.stage
    }

    pub(crate) fn advance(&mut self, next: RenderStage) -> PhotostripResult<()> {
        if !self.stage.can_advance_to(next) {
            return Err(PhotostripError::render(format!(
                "illegal composition stage transition {:?} -> {:?}",
                self.stage, next
            )));
        }
        tracing::debug!(
            layout = %self.layout_id,
            from = ?self.stage,
            to = ?next,
            "composition stage"
        );
        self.stage = next;
        Ok(())
    }

    /// Move to `Failed` unless already terminal.
    pub(crate) fn fail(&mut self, err: &PhotostripError) {
        if self.stage.is_terminal() {
            return;
        }
        tracing::debug!(
            layout = %self.layout_id,
            from = ?self.stage,
            error = %err,
            "composition failed"
        );
        self.stage = RenderStage::Failed;
    }
}

/// A sticker ready to draw: bitmap plus its canvas transform.
#[derive(Clone, Debug)]
pub(crate) struct StickerLayer {
    pub id: String,
    pub image: PreparedImage,
    pub transform: Affine,
    pub z_index: u32,
}

/// Everything the draw pass needs, with all fallible loading already done.
#[derive(Debug)]
pub(crate) struct Scene<'a> {
    pub geometry: &'a ResolvedGeometry,
    pub background: Rgba8,
    /// Already filtered, one slot per cell; missing or `None` slots stay background.
    pub photos: &'a [Option<PreparedImage>],
    pub frame: Option<&'a PreparedImage>,
    /// Sorted by ascending `z_index`.
    pub stickers: &'a [StickerLayer],
}

/// Glyphs are rasterized at most this large and scaled up beyond it.
const MAX_GLYPH_RASTER_PX: u32 = 2048;

/// Edge of a sticker's bounding box in canvas pixels.
pub fn sticker_box_px(canvas: Canvas, base_fraction: f64, scale: f64) -> f64 {
    f64::from(canvas.width.min(canvas.height)) * base_fraction * scale
}

/// Canvas transform for a `width x height` sticker bitmap.
///
/// The bitmap is fitted (longest side) into a `box_px` square, centered on its own origin,
/// rotated clockwise by `rotation_deg` and moved to `(x%, y%)` of the canvas.
pub fn sticker_transform(
    placement: &StickerPlacement,
    canvas: Canvas,
    width: u32,
    height: u32,
    box_px: f64,
) -> Affine {
    let (w, h) = (f64::from(width.max(1)), f64::from(height.max(1)));
    let fit = box_px / w.max(h);
    let cx = placement.x / 100.0 * f64::from(canvas.width);
    let cy = placement.y / 100.0 * f64::from(canvas.height);
    Affine::translate((cx, cy))
        * Affine::rotate(placement.rotation_deg.to_radians())
        * Affine::scale(fit)
        * Affine::translate((-w / 2.0, -h / 2.0))
}

/// Apply `filter` to every loaded photo, in parallel on the current rayon pool.
pub(crate) fn filter_photos(
    filter: &FilterSpec,
    photos: Vec<Option<PreparedImage>>,
) -> Vec<Option<PreparedImage>> {
    if filter.is_identity() {
        return photos;
    }
    photos
        .into_par_iter()
        .map(|p| p.map(|img| filter.apply_to_image(&img)))
        .collect()
}

/// Turn placements into drawable layers, sorted by `z_index`.
///
/// Image stickers come from `images` (keyed by placement id); glyph stickers are rasterized
/// with `glyphs`. Stickers that cannot be drawn, or that repeat an earlier id or `z_index`,
/// are skipped with a warning. Position and scale are clamped to the editor's ranges.
pub(crate) fn prepare_stickers(
    placements: &[StickerPlacement],
    images: &HashMap<String, PreparedImage>,
    glyphs: Option<&GlyphRasterizer>,
    canvas: Canvas,
    base_fraction: f64,
    warnings: &mut Vec<CompositionWarning>,
) -> Vec<StickerLayer> {
    let mut layers = Vec::with_capacity(placements.len());
    let mut seen_ids = HashSet::new();
    let mut seen_z = HashSet::new();
    for p in placements {
        let mut skip = |reason: String| {
            tracing::warn!(sticker_id = %p.id, %reason, "sticker skipped");
            warnings.push(CompositionWarning::StickerRenderFailed {
                sticker_id: p.id.clone(),
                reason,
            });
        };

        if let Err(reason) = p.check_finite() {
            skip(reason);
            continue;
        }
        if !seen_ids.insert(p.id.as_str()) {
            skip("duplicate sticker id".to_string());
            continue;
        }
        if !seen_z.insert(p.z_index) {
            skip(format!("z_index {} is already taken", p.z_index));
            continue;
        }
        let p = &p.clamped();
        let box_px = sticker_box_px(canvas, base_fraction, p.scale);

        let image = match &p.content {
            // Load failures were already reported by the loader.
            StickerContent::Image(_) => match images.get(&p.id) {
                Some(img) => img.clone(),
                None => continue,
            },
            StickerContent::Glyph(text) => {
                let Some(glyphs) = glyphs else {
                    skip("no glyph rasterizer available".to_string());
                    continue;
                };
                let raster_px = (box_px.round() as u32).clamp(1, MAX_GLYPH_RASTER_PX);
                match glyphs.rasterize(text, raster_px) {
                    Ok(img) => img,
                    Err(err) => {
                        skip(err.to_string());
                        continue;
                    }
                }
            }
        };

        let transform = sticker_transform(p, canvas, image.width, image.height, box_px);
        layers.push(StickerLayer {
            id: p.id.clone(),
            image,
            transform,
            z_index: p.z_index,
        });
    }
    layers.sort_by_key(|l| l.z_index);
    layers
}

/// Draw background, photos, frame overlay and stickers, in that order.
pub(crate) fn draw_scene(scene: &Scene<'_>) -> PhotostripResult<Surface> {
    let canvas = scene.geometry.canvas;
    let (w, h) = surface_size(canvas)?;
    let full = Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height));

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_paint(scene.background));
    ctx.fill_rect(&rect_to_cpu(full));

    for cell in &scene.geometry.cells {
        let Some(Some(img)) = scene.photos.get(cell.index) else {
            continue;
        };
        let Some(fit) = cover_fit(img.width, img.height, cell.to_rect()) else {
            continue;
        };
        // Filling only the visible crop under the cover transform clips to the cell.
        ctx.set_transform(affine_to_cpu(fit.transform()));
        ctx.set_paint(image_paint(img)?);
        ctx.fill_rect(&rect_to_cpu(fit.src_crop));
    }

    if let Some(frame) = scene.frame
        && frame.width > 0
        && frame.height > 0
    {
        if frame.width != canvas.width || frame.height != canvas.height {
            tracing::debug!(
                frame_w = frame.width,
                frame_h = frame.height,
                canvas_w = canvas.width,
                canvas_h = canvas.height,
                "frame overlay size differs from canvas; stretching"
            );
        }
        let sx = f64::from(canvas.width) / f64::from(frame.width);
        let sy = f64::from(canvas.height) / f64::from(frame.height);
        ctx.set_transform(affine_to_cpu(Affine::scale_non_uniform(sx, sy)));
        ctx.set_paint(image_paint(frame)?);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(frame.width),
            f64::from(frame.height),
        ));
    }

    for sticker in scene.stickers {
        ctx.set_transform(affine_to_cpu(sticker.transform));
        ctx.set_paint(image_paint(&sticker.image)?);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(sticker.image.width),
            f64::from(sticker.image.height),
        ));
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(Surface {
        canvas,
        rgba8_premul: pixmap.data_as_u8_slice().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
