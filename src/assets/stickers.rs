//! Sticker catalogue and the immutable placement model the editor produces.

use std::sync::Arc;

use crate::assets::loader::AssetSource;

/// Sticker grouping shown as tabs in the picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerCategory {
    /// Faces and feelings.
    Emotions,
    /// Marks and arrows.
    Symbols,
    /// Things.
    Objects,
}

/// Catalogue entry for one emoji sticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickerInfo {
    /// Sticker id.
    pub id: &'static str,
    /// Glyph drawn for the sticker.
    pub emoji: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Picker category.
    pub category: StickerCategory,
}

macro_rules! sticker {
    ($id:literal, $emoji:literal, $name:literal, $cat:ident) => {
        StickerInfo {
            id: $id,
            emoji: $emoji,
            name: $name,
            category: StickerCategory::$cat,
        }
    };
}

/// Built-in stickers.
pub const STICKERS: &[StickerInfo] = &[
    sticker!("heart", "\u{2764}\u{fe0f}", "Heart", Emotions),
    sticker!("star", "\u{2b50}", "Star", Emotions),
    sticker!("sparkles", "\u{2728}", "Sparkles", Emotions),
    sticker!("fire", "\u{1f525}", "Fire", Emotions),
    sticker!("smile", "\u{1f60a}", "Smile", Emotions),
    sticker!("cool", "\u{1f60e}", "Cool", Emotions),
    sticker!("love", "\u{1f60d}", "Love Eyes", Emotions),
    sticker!("party", "\u{1f389}", "Party", Emotions),
    sticker!("check", "\u{2713}", "Check", Symbols),
    sticker!("cross", "\u{2717}", "Cross", Symbols),
    sticker!("arrow-right", "\u{2192}", "Arrow Right", Symbols),
    sticker!("arrow-left", "\u{2190}", "Arrow Left", Symbols),
    sticker!("music", "\u{266a}", "Music", Symbols),
    sticker!("peace", "\u{262e}", "Peace", Symbols),
    sticker!("camera", "\u{1f4f7}", "Camera", Objects),
    sticker!("balloon", "\u{1f388}", "Balloon", Objects),
    sticker!("gift", "\u{1f381}", "Gift", Objects),
    sticker!("crown", "\u{1f451}", "Crown", Objects),
    sticker!("rainbow", "\u{1f308}", "Rainbow", Objects),
    sticker!("sun", "\u{2600}\u{fe0f}", "Sun", Objects),
];

/// Look up a built-in sticker.
pub fn sticker_by_id(id: &str) -> Option<&'static StickerInfo> {
    STICKERS.iter().find(|s| s.id == id)
}

/// Stickers in `category`, or all of them for `None`.
pub fn stickers_in_category(
    category: Option<StickerCategory>,
) -> impl Iterator<Item = &'static StickerInfo> {
    STICKERS
        .iter()
        .filter(move |s| category.is_none_or(|c| s.category == c))
}

/// What a sticker draws.
#[derive(Clone, Debug, PartialEq)]
pub enum StickerContent {
    /// A text glyph (usually an emoji), rasterized with system fonts.
    Glyph(String),
    /// A bitmap, decoded like a photo.
    Image(AssetSource),
}

/// One sticker on the canvas.
///
/// `x`/`y` are percentages of canvas width/height and locate the sticker's center. Scale and
/// rotation apply around that center. `z_index` orders stickers among themselves only.
#[derive(Clone, Debug, PartialEq)]
pub struct StickerPlacement {
    /// Placement id, unique within a board.
    pub id: String,
    /// Glyph or image.
    pub content: StickerContent,
    /// Center x in percent of canvas width, `[0, 100]`.
    pub x: f64,
    /// Center y in percent of canvas height, `[0, 100]`.
    pub y: f64,
    /// Uniform scale, 1.0 = base sticker size.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
    /// Draw order among stickers (ascending).
    pub z_index: u32,
}

impl StickerPlacement {
    /// A placement at the canvas center with default scale and rotation.
    pub fn centered(id: impl Into<String>, content: StickerContent, z_index: u32) -> Self {
        Self {
            id: id.into(),
            content,
            x: 50.0,
            y: 50.0,
            scale: 1.0,
            rotation_deg: 0.0,
            z_index,
        }
    }

    /// Placement from a catalogue sticker.
    pub fn from_catalogue(id: impl Into<String>, info: &StickerInfo, z_index: u32) -> Self {
        Self::centered(id, StickerContent::Glyph(info.emoji.to_string()), z_index)
    }

    pub(crate) fn check_finite(&self) -> Result<(), String> {
        let finite = [self.x, self.y, self.scale, self.rotation_deg]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err("position, scale and rotation must be finite".to_string());
        }
        if self.scale <= 0.0 {
            return Err("scale must be > 0".to_string());
        }
        Ok(())
    }

    /// Copy with position, scale and rotation pulled into the ranges the board enforces.
    pub(crate) fn clamped(&self) -> Self {
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
            scale: self.scale.clamp(STICKER_SCALE_RANGE.0, STICKER_SCALE_RANGE.1),
            rotation_deg: self.rotation_deg.rem_euclid(360.0),
            ..self.clone()
        }
    }
}

/// Smallest and largest scale the editor allows.
pub const STICKER_SCALE_RANGE: (f64, f64) = (0.1, 10.0);

/// Immutable sticker editor state.
///
/// Every gesture returns a new board; the old one stays valid, so a render can keep consuming
/// an earlier [`snapshot`](Self::snapshot) while input handling moves on.
#[derive(Clone, Debug, Default)]
pub struct StickerBoard {
    placements: Arc<[StickerPlacement]>,
    next_z: u32,
    next_id: u64,
}

impl StickerBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `content` at the canvas center on top of every existing sticker.
    ///
    /// Returns the new board and the id of the added placement.
    pub fn with_added(&self, content: StickerContent) -> (Self, String) {
        let id = format!("sticker-{}", self.next_id);
        let mut placements = self.placements.to_vec();
        placements.push(StickerPlacement::centered(id.clone(), content, self.next_z));
        let board = Self {
            placements: placements.into(),
            next_z: self.next_z + 1,
            next_id: self.next_id + 1,
        };
        (board, id)
    }

    /// Move a sticker's center; coordinates clamp to `[0, 100]`.
    pub fn with_moved(&self, id: &str, x: f64, y: f64) -> Self {
        self.map_one(id, |p| {
            if x.is_finite() && y.is_finite() {
                p.x = x.clamp(0.0, 100.0);
                p.y = y.clamp(0.0, 100.0);
            }
        })
    }

    /// Set a sticker's scale, clamped to [`STICKER_SCALE_RANGE`].
    pub fn with_scaled(&self, id: &str, scale: f64) -> Self {
        self.map_one(id, |p| {
            if scale.is_finite() {
                p.scale = scale.clamp(STICKER_SCALE_RANGE.0, STICKER_SCALE_RANGE.1);
            }
        })
    }

    /// Set a sticker's rotation, normalized to `[0, 360)`.
    pub fn with_rotated(&self, id: &str, rotation_deg: f64) -> Self {
        self.map_one(id, |p| {
            if rotation_deg.is_finite() {
                p.rotation_deg = rotation_deg.rem_euclid(360.0);
            }
        })
    }

    /// Drop a sticker. Remaining z-indices are left untouched.
    pub fn with_removed(&self, id: &str) -> Self {
        let placements: Vec<_> = self
            .placements
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        Self {
            placements: placements.into(),
            next_z: self.next_z,
            next_id: self.next_id,
        }
    }

    /// Placement by id.
    pub fn get(&self, id: &str) -> Option<&StickerPlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Number of stickers.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the board has no stickers.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Owned copy of the placements, in insertion order.
    pub fn snapshot(&self) -> Vec<StickerPlacement> {
        self.placements.to_vec()
    }

    fn map_one(&self, id: &str, f: impl FnOnce(&mut StickerPlacement)) -> Self {
        let mut placements = self.placements.to_vec();
        if let Some(p) = placements.iter_mut().find(|p| p.id == id) {
            f(p);
        }
        Self {
            placements: placements.into(),
            next_z: self.next_z,
            next_id: self.next_id,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/stickers.rs"]
mod tests;
