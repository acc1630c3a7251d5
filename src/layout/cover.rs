use crate::foundation::core::{Affine, Rect};

/// Placement of a source bitmap that covers a target cell ("object-fit: cover").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied on both axes.
    pub scale: f64,
    /// Where the whole scaled source lands, in canvas coordinates. Extends past the cell on
    /// at most one axis.
    pub draw: Rect,
    /// Part of the source (in source pixels) that remains visible inside the cell.
    pub src_crop: Rect,
}

impl CoverFit {
    /// Source-pixel to canvas-pixel transform.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.draw.x0, self.draw.y0)) * Affine::scale(self.scale)
    }

    /// Whether the source had to be cropped horizontally.
    pub fn crops_horizontally(&self, src_width: u32) -> bool {
        self.src_crop.width() < f64::from(src_width)
    }

    /// Whether the source had to be cropped vertically.
    pub fn crops_vertically(&self, src_height: u32) -> bool {
        self.src_crop.height() < f64::from(src_height)
    }
}

/// Scale `src_width x src_height` uniformly by
/// `max(cell_w / src_w, cell_h / src_h)` and center it over `cell`.
///
/// Returns `None` for empty sources or cells.
pub fn cover_fit(src_width: u32, src_height: u32, cell: Rect) -> Option<CoverFit> {
    if src_width == 0 || src_height == 0 || cell.width() <= 0.0 || cell.height() <= 0.0 {
        return None;
    }
    let (sw, sh) = (f64::from(src_width), f64::from(src_height));
    let scale = (cell.width() / sw).max(cell.height() / sh);

    let draw_w = sw * scale;
    let draw_h = sh * scale;
    let x0 = cell.x0 + (cell.width() - draw_w) / 2.0;
    let y0 = cell.y0 + (cell.height() - draw_h) / 2.0;

    // Visible source extent, centered; min() absorbs float noise on the fitted axis.
    let vis_w = (cell.width() / scale).min(sw);
    let vis_h = (cell.height() / scale).min(sh);
    let sx0 = (sw - vis_w) / 2.0;
    let sy0 = (sh - vis_h) / 2.0;

    Some(CoverFit {
        scale,
        draw: Rect::new(x0, y0, x0 + draw_w, y0 + draw_h),
        src_crop: Rect::new(sx0, sy0, sx0 + vis_w, sy0 + vis_h),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cover.rs"]
mod tests;
