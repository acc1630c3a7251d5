use crate::foundation::error::{PhotostripError, PhotostripResult};

/// A `rows x cols` photo grid. Fixes both the capture count and the composition grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LayoutSpec {
    /// Stable layout id, e.g. `"2x2"`. Keys the geometry registry and frame assets.
    pub id: String,
    /// Grid rows (> 0).
    pub rows: u32,
    /// Grid columns (> 0).
    pub cols: u32,
}

/// Catalogue entry describing a built-in layout to the picker UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutInfo {
    /// Layout id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Short description.
    pub description: &'static str,
}

/// Built-in layouts, in picker order. The first entry is the default.
pub const LAYOUTS: &[LayoutInfo] = &[
    LayoutInfo {
        id: "2x2",
        name: "Classic 2x2",
        rows: 2,
        cols: 2,
        description: "Classic photo booth style with 4 photos",
    },
    LayoutInfo {
        id: "1x4",
        name: "Vertical Strip",
        rows: 4,
        cols: 1,
        description: "Vertical strip layout",
    },
    LayoutInfo {
        id: "3x3",
        name: "Grid 3x3",
        rows: 3,
        cols: 3,
        description: "Nine photos in a grid",
    },
];

impl LayoutSpec {
    /// Build a layout, rejecting empty grids.
    pub fn new(id: impl Into<String>, rows: u32, cols: u32) -> PhotostripResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PhotostripError::validation("layout id must be non-empty"));
        }
        if rows == 0 || cols == 0 {
            return Err(PhotostripError::validation(format!(
                "layout '{id}' must have rows > 0 and cols > 0"
            )));
        }
        Ok(Self { id, rows, cols })
    }

    /// Look up a built-in layout.
    pub fn by_id(id: &str) -> Option<Self> {
        LAYOUTS.iter().find(|l| l.id == id).map(Self::from)
    }

    /// The 2x2 layout.
    pub fn default_layout() -> Self {
        Self::from(&LAYOUTS[0])
    }

    /// Number of cells (`rows * cols`).
    pub fn total(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub(crate) fn validate(&self) -> PhotostripResult<()> {
        Self::new(self.id.clone(), self.rows, self.cols).map(|_| ())
    }
}

impl From<&LayoutInfo> for LayoutSpec {
    fn from(info: &LayoutInfo) -> Self {
        Self {
            id: info.id.to_string(),
            rows: info.rows,
            cols: info.cols,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
