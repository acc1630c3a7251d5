//! photostrip composes photo-booth captures into a single printable image.
//!
//! A [`CompositionRequest`] names a layout, the captured photos, a color filter, an optional
//! frame and any stickers. [`Engine::compose`] resolves the layout's frozen geometry, decodes
//! every asset concurrently, draws background, cover-fit photos, frame overlay and stickers in
//! that order, and encodes the canvas as JPEG. Per-asset failures become
//! [`CompositionWarning`]s on an otherwise successful result.
//!
//! - [`GeometryRegistry`] owns the canvas/cell contract frame art is authored against
//! - [`PreviewSlot`] drops previews superseded by a newer request
//! - [`StickerBoard`] is the immutable sticker-editing model
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{CompositionWarning, PhotostripError, PhotostripResult};

pub use crate::assets::decode::{DecodeLimits, PreparedImage, decode_image};
pub use crate::assets::frames::{
    BorderStyle, FRAMES, FrameInfo, FrameKind, NO_FRAME_ID, frame_by_id, overlay_path,
    resolve_frame,
};
pub use crate::assets::glyph::GlyphRasterizer;
pub use crate::assets::loader::{AssetSource, load_source};
pub use crate::assets::stickers::{
    STICKER_SCALE_RANGE, STICKERS, StickerBoard, StickerCategory, StickerContent, StickerInfo,
    StickerPlacement, sticker_by_id, stickers_in_category,
};
pub use crate::effects::composite::{flatten_to_rgb8, over};
pub use crate::effects::filter::{
    ColorOp, FILTERS, FilterInfo, FilterSpec, IDENTITY_FILTER_ID, filter_by_id,
};
pub use crate::encode::jpeg::{
    DEFAULT_QUALITY, EncodedImage, clamp_quality, encode_jpeg, human_size, jpeg_quality,
};
pub use crate::layout::cover::{CoverFit, cover_fit};
pub use crate::layout::geometry::{
    CellGeometry, CellRect, FrameSettings, GEOMETRY_CONTRACT_VERSION, GeometryRegistry,
    ResolvedGeometry,
};
pub use crate::layout::spec::{LAYOUTS, LayoutInfo, LayoutSpec};
pub use crate::render::compositor::{RenderStage, sticker_box_px, sticker_transform};
pub use crate::render::surface::Surface;
pub use crate::session::engine::{
    CompositionResult, Engine, EngineOpts, LayoutDimensions, RenderedComposition,
};
pub use crate::session::preview::{Generation, PreviewSlot};
pub use crate::session::request::{CompositionMode, CompositionRequest};
