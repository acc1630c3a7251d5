/// Convenience result type used across photostrip.
pub type PhotostripResult<T> = Result<T, PhotostripError>;

/// Fatal errors: any of these ends a composition without output.
#[derive(thiserror::Error, Debug)]
pub enum PhotostripError {
    /// The layout id has no registered cell/border parameters.
    #[error("unsupported layout '{layout_id}'")]
    UnsupportedLayout {
        /// Offending layout id.
        layout_id: String,
    },

    /// The request carried zero photos.
    #[error("no photos provided")]
    NoPhotosProvided,

    /// Export was requested with fewer photos than the layout has cells.
    #[error("incomplete photo set: layout needs {expected}, got {provided}")]
    IncompletePhotoSet {
        /// Cell count of the layout.
        expected: usize,
        /// Photos actually supplied.
        provided: usize,
    },

    /// The output surface could not be encoded.
    #[error("encode failed: {0}")]
    EncodeFailed(String),

    /// Invalid user-provided request or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal drawing failure.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotostripError {
    /// Build a [`PhotostripError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotostripError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PhotostripError::EncodeFailed`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::EncodeFailed(msg.into())
    }

    /// Build a [`PhotostripError::UnsupportedLayout`] value.
    pub fn unsupported_layout(layout_id: impl Into<String>) -> Self {
        Self::UnsupportedLayout {
            layout_id: layout_id.into(),
        }
    }

    /// Actionable sentence suitable for showing to the person at the booth.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedLayout { layout_id } => {
                format!("The '{layout_id}' layout is not available. Please pick another layout.")
            }
            Self::NoPhotosProvided => "Take at least one photo before continuing.".to_string(),
            Self::IncompletePhotoSet { expected, provided } => {
                let remaining = expected.saturating_sub(*provided);
                let noun = if remaining == 1 { "photo" } else { "photos" };
                format!("Capture {remaining} more {noun} before exporting.")
            }
            Self::EncodeFailed(_) => "Failed to export image. Please try again.".to_string(),
            Self::Validation(msg) => format!("The photo settings are invalid: {msg}."),
            Self::Render(_) | Self::Other(_) => {
                "Something went wrong while creating your image.".to_string()
            }
        }
    }
}

/// Recoverable problems absorbed during a composition.
///
/// These never abort a render; they are attached to an otherwise successful result.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompositionWarning {
    /// Photo `index` could not be loaded; its cell shows the background.
    PhotoDecodeFailed {
        /// Row-major photo index.
        index: usize,
        /// Decoder or IO message.
        reason: String,
    },
    /// The frame overlay could not be loaded; the composition has no overlay.
    FrameDecodeFailed {
        /// Overlay location that failed.
        path: String,
        /// Decoder or IO message.
        reason: String,
    },
    /// A sticker could not be rasterized and was skipped.
    StickerRenderFailed {
        /// Placement id of the skipped sticker.
        sticker_id: String,
        /// Rasterizer or decoder message.
        reason: String,
    },
}

impl CompositionWarning {
    /// Non-blocking notice for the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::PhotoDecodeFailed { index, .. } => format!(
                "Photo {} could not be loaded and was left blank.",
                index + 1
            ),
            Self::FrameDecodeFailed { .. } => {
                "The frame could not be loaded, so your photos were exported without it."
                    .to_string()
            }
            Self::StickerRenderFailed { .. } => {
                "One sticker could not be drawn and was left out.".to_string()
            }
        }
    }
}

impl std::fmt::Display for CompositionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhotoDecodeFailed { index, reason } => {
                write!(f, "photo {index} decode failed: {reason}")
            }
            Self::FrameDecodeFailed { path, reason } => {
                write!(f, "frame '{path}' decode failed: {reason}")
            }
            Self::StickerRenderFailed { sticker_id, reason } => {
                write!(f, "sticker '{sticker_id}' render failed: {reason}")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
