use crate::{
    assets::{frames::NO_FRAME_ID, loader::AssetSource, stickers::StickerPlacement},
    effects::filter::IDENTITY_FILTER_ID,
    encode::jpeg::DEFAULT_QUALITY,
    foundation::{
        core::Rgba8,
        error::{PhotostripError, PhotostripResult},
    },
    layout::{
        geometry::{GeometryRegistry, ResolvedGeometry},
        spec::LayoutSpec,
    },
};

/// Live preview tolerates missing photos; export requires a full set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionMode {
    Preview,
    #[default]
    Export,
}

/// Full input of one composition. Built per call and never mutated by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionRequest {
    /// Captured photos, in cell order.
    pub photos: Vec<AssetSource>,
    pub layout: LayoutSpec,
    pub filter_id: String,
    pub frame_id: String,
    /// Border color for the `solid-color` frame.
    pub frame_color: Option<Rgba8>,
    pub stickers: Vec<StickerPlacement>,
    /// Encoder quality in `(0, 1]`; out-of-range values are clamped.
    pub quality: f32,
    pub mode: CompositionMode,
}

impl CompositionRequest {
    /// Export request with no filter, frame or stickers.
    pub fn new(layout: LayoutSpec, photos: Vec<AssetSource>) -> Self {
        Self {
            photos,
            layout,
            filter_id: IDENTITY_FILTER_ID.to_string(),
            frame_id: NO_FRAME_ID.to_string(),
            frame_color: None,
            stickers: Vec::new(),
            quality: DEFAULT_QUALITY,
            mode: CompositionMode::Export,
        }
    }

    pub fn with_filter(mut self, filter_id: impl Into<String>) -> Self {
        self.filter_id = filter_id.into();
        self
    }

    pub fn with_frame(mut self, frame_id: impl Into<String>, color: Option<Rgba8>) -> Self {
        self.frame_id = frame_id.into();
        self.frame_color = color;
        self
    }

    pub fn with_stickers(mut self, stickers: Vec<StickerPlacement>) -> Self {
        self.stickers = stickers;
        self
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_mode(mut self, mode: CompositionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check the request against `registry` and resolve its geometry.
    ///
    /// Order: no photos, unknown layout, too many photos, then (export only) too few.
    pub fn validate(&self, registry: &GeometryRegistry) -> PhotostripResult<ResolvedGeometry> {
        if self.photos.is_empty() {
            return Err(PhotostripError::NoPhotosProvided);
        }

        let geometry = registry.resolve(&self.layout)?;
        let expected = self.layout.total();
        let provided = self.photos.len();

        if provided > expected {
            return Err(PhotostripError::validation(format!(
                "layout '{}' has {expected} cells but {provided} photos were supplied",
                self.layout.id
            )));
        }
        if self.mode == CompositionMode::Export && provided < expected {
            return Err(PhotostripError::IncompletePhotoSet { expected, provided });
        }
        Ok(geometry)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/request.rs"]
mod tests;
