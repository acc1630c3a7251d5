use std::path::Path;

use crate::{assets::loader::AssetSource, foundation::core::Rgba8};

/// What the compositor draws for the selected frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameKind {
    /// Nothing is drawn.
    NoFrame,
    /// The border area (everything outside the cells) takes a solid color.
    StyledBorder(BorderStyle),
    /// A full-canvas bitmap authored at the layout's exact canvas size, drawn above photos.
    ImageOverlay(AssetSource),
}

/// Parameters of a [`FrameKind::StyledBorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderStyle {
    /// Border fill color.
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameStyle {
    None,
    SolidColor,
    Overlay { layouts: &'static [&'static str] },
}

/// Catalogue entry for the frame picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frame id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    style: FrameStyle,
}

impl FrameInfo {
    /// Whether an overlay asset exists for `layout_id`.
    pub fn supports_layout(&self, layout_id: &str) -> bool {
        match self.style {
            FrameStyle::None | FrameStyle::SolidColor => true,
            FrameStyle::Overlay { layouts } => layouts.contains(&layout_id),
        }
    }
}

/// Id of the "no frame" entry.
pub const NO_FRAME_ID: &str = "none";

/// Built-in frames.
pub const FRAMES: &[FrameInfo] = &[
    FrameInfo {
        id: NO_FRAME_ID,
        name: "No Frame",
        description: "Clean, no border",
        style: FrameStyle::None,
    },
    FrameInfo {
        id: "solid-color",
        name: "Solid Color",
        description: "Plain border in a color of your choice",
        style: FrameStyle::SolidColor,
    },
    FrameInfo {
        id: "polaroid",
        name: "Polaroid",
        description: "Classic instant photo",
        style: FrameStyle::Overlay {
            layouts: &["2x2", "1x4", "3x3"],
        },
    },
];

/// Look up a built-in frame.
pub fn frame_by_id(id: &str) -> Option<&'static FrameInfo> {
    FRAMES.iter().find(|f| f.id == id)
}

/// Overlay location for `(frame_id, layout_id)`: `{root}/{frame_id}/{layout_id}.png`.
pub fn overlay_path(root: &Path, frame_id: &str, layout_id: &str) -> std::path::PathBuf {
    root.join(frame_id).join(format!("{layout_id}.png"))
}

/// Resolve the frame selection for one composition.
///
/// Unknown frame ids and layouts without an authored overlay resolve to
/// [`FrameKind::NoFrame`]; frames are cosmetic and never block a composition.
pub fn resolve_frame(
    frame_id: &str,
    layout_id: &str,
    frame_color: Option<Rgba8>,
    asset_root: &Path,
) -> FrameKind {
    let Some(info) = frame_by_id(frame_id) else {
        tracing::warn!(frame_id, "unknown frame id; composing without a frame");
        return FrameKind::NoFrame;
    };

    match info.style {
        FrameStyle::None => FrameKind::NoFrame,
        FrameStyle::SolidColor => FrameKind::StyledBorder(BorderStyle {
            color: frame_color.unwrap_or(Rgba8::WHITE),
        }),
        FrameStyle::Overlay { .. } if info.supports_layout(layout_id) => FrameKind::ImageOverlay(
            AssetSource::Path(overlay_path(asset_root, frame_id, layout_id)),
        ),
        FrameStyle::Overlay { .. } => {
            tracing::debug!(frame_id, layout_id, "frame has no overlay for layout");
            FrameKind::NoFrame
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frames.rs"]
mod tests;
