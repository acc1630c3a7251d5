//! Layout geometry: the frozen mapping from a layout id to canvas size and cell rectangles.
//!
//! Frame overlay art is authored against the exact pixel dimensions produced here, so the
//! numbers in [`GeometryRegistry::builtin`] are a versioned contract. Changing any of them
//! means re-authoring every overlay for the affected layout and bumping
//! [`GEOMETRY_CONTRACT_VERSION`].

use std::collections::BTreeMap;

use crate::{
    foundation::core::{Canvas, Rect},
    foundation::error::{PhotostripError, PhotostripResult},
    layout::spec::LayoutSpec,
};

/// Version of the built-in geometry table.
pub const GEOMETRY_CONTRACT_VERSION: u32 = 1;

/// Size of one photo slot. Shared by every layout of a registry (4:3 landscape by default).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellGeometry {
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
}

/// Per-layout gap and border constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSettings {
    /// Gap between neighboring cells.
    pub cell_gap: u32,
    /// Left and right border.
    pub side_border: u32,
    /// Border above the first row.
    pub top_border: u32,
    /// Border below the last row.
    pub bottom_border: u32,
}

/// One placed cell, in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CellRect {
    /// Row-major index (matches the photo index).
    pub index: usize,
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub col: u32,
    /// Left edge in canvas pixels.
    pub x: u32,
    /// Top edge in canvas pixels.
    pub y: u32,
    /// Cell width.
    pub width: u32,
    /// Cell height.
    pub height: u32,
}

impl CellRect {
    /// Cell bounds as a float rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }

    /// Whether pixel `(px, py)` lies inside the cell.
    pub fn contains(self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Center pixel of the cell.
    pub fn center(self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Output of [`GeometryRegistry::resolve`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedGeometry {
    /// Version of the registry that produced these numbers.
    pub contract_version: u32,
    /// Output canvas size.
    pub canvas: Canvas,
    /// Cell rectangles, row-major, `rows * cols` entries.
    pub cells: Vec<CellRect>,
}

/// Grid shape and borders registered for one layout id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RegisteredLayout {
    rows: u32,
    cols: u32,
    settings: FrameSettings,
}

/// Registered cell/border parameters, keyed by layout id.
///
/// Each id is bound to one grid shape, so it maps to exactly one canvas size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometryRegistry {
    version: u32,
    cell: CellGeometry,
    layouts: BTreeMap<String, RegisteredLayout>,
}

impl GeometryRegistry {
    /// Empty registry with the given cell size.
    pub fn new(version: u32, cell: CellGeometry) -> Self {
        Self {
            version,
            cell,
            layouts: BTreeMap::new(),
        }
    }

    /// The frozen geometry the shipped frame overlays were authored against.
    pub fn builtin() -> Self {
        let borders = |top, bottom| FrameSettings {
            cell_gap: 64,
            side_border: 60,
            top_border: top,
            bottom_border: bottom,
        };
        Self::new(
            GEOMETRY_CONTRACT_VERSION,
            CellGeometry {
                width: 1920,
                height: 1440,
            },
        )
        .with_layout("2x2", 2, 2, borders(1000, 120))
        .with_layout("1x4", 4, 1, borders(120, 1000))
        .with_layout("3x3", 3, 3, borders(1200, 1200))
    }

    /// Register (or replace) `layout_id` as a `rows` x `cols` grid with `settings`.
    pub fn with_layout(
        mut self,
        layout_id: impl Into<String>,
        rows: u32,
        cols: u32,
        settings: FrameSettings,
    ) -> Self {
        self.layouts.insert(
            layout_id.into(),
            RegisteredLayout {
                rows,
                cols,
                settings,
            },
        );
        self
    }

    /// Contract version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Shared cell size.
    pub fn cell(&self) -> CellGeometry {
        self.cell
    }

    /// Settings for one layout id.
    pub fn settings(&self, layout_id: &str) -> Option<FrameSettings> {
        self.layouts.get(layout_id).map(|l| l.settings)
    }

    /// Registered `(rows, cols)` for one layout id.
    pub fn grid(&self, layout_id: &str) -> Option<(u32, u32)> {
        self.layouts.get(layout_id).map(|l| (l.rows, l.cols))
    }

    /// Registered layout ids, sorted.
    pub fn layout_ids(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    /// Canvas dimensions only.
    pub fn canvas_for(&self, layout: &LayoutSpec) -> PhotostripResult<Canvas> {
        let settings = self.lookup(layout)?;
        canvas_dimensions(layout, self.cell, settings)
    }

    /// Canvas dimensions and every cell rectangle for `layout`.
    #[tracing::instrument(skip_all, fields(layout = %layout.id))]
    pub fn resolve(&self, layout: &LayoutSpec) -> PhotostripResult<ResolvedGeometry> {
        layout.validate()?;
        let settings = self.lookup(layout)?;
        let canvas = canvas_dimensions(layout, self.cell, settings)?;

        let mut cells = Vec::with_capacity(layout.total());
        for index in 0..layout.total() {
            let row = (index / layout.cols as usize) as u32;
            let col = (index % layout.cols as usize) as u32;
            cells.push(CellRect {
                index,
                row,
                col,
                x: settings.side_border + col * (self.cell.width + settings.cell_gap),
                y: settings.top_border + row * (self.cell.height + settings.cell_gap),
                width: self.cell.width,
                height: self.cell.height,
            });
        }

        Ok(ResolvedGeometry {
            contract_version: self.version,
            canvas,
            cells,
        })
    }

    fn lookup(&self, layout: &LayoutSpec) -> PhotostripResult<FrameSettings> {
        let registered = self
            .layouts
            .get(&layout.id)
            .ok_or_else(|| PhotostripError::unsupported_layout(&layout.id))?;
        if (registered.rows, registered.cols) != (layout.rows, layout.cols) {
            return Err(PhotostripError::validation(format!(
                "layout '{}' is registered as {} rows x {} cols, got {} x {}",
                layout.id, registered.rows, registered.cols, layout.rows, layout.cols
            )));
        }
        Ok(registered.settings)
    }
}

impl Default for GeometryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn canvas_dimensions(
    layout: &LayoutSpec,
    cell: CellGeometry,
    s: FrameSettings,
) -> PhotostripResult<Canvas> {
    let rows = u64::from(layout.rows);
    let cols = u64::from(layout.cols);
    let gap = u64::from(s.cell_gap);

    let width = cols * u64::from(cell.width)
        + cols.saturating_sub(1) * gap
        + 2 * u64::from(s.side_border);
    let height = rows * u64::from(cell.height)
        + rows.saturating_sub(1) * gap
        + u64::from(s.top_border)
        + u64::from(s.bottom_border);

    let to_u32 = |v: u64| {
        u32::try_from(v).map_err(|_| {
            PhotostripError::validation(format!("layout '{}' canvas is too large", layout.id))
        })
    };
    Ok(Canvas {
        width: to_u32(width)?,
        height: to_u32(height)?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
