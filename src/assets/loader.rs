use std::{borrow::Cow, collections::HashMap, path::PathBuf, sync::Arc};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::decode::{DecodeLimits, PreparedImage, decode_image},
    assets::stickers::{StickerContent, StickerPlacement},
    foundation::error::{CompositionWarning, PhotostripResult},
};

/// Where an image comes from: bytes already in memory (captured photos) or a file.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetSource {
    /// Encoded image bytes.
    Bytes(Arc<[u8]>),
    /// Path to an encoded image file.
    Path(PathBuf),
}

impl AssetSource {
    /// In-memory source.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self::Bytes(Arc::from(bytes))
    }

    /// Human-readable location for warnings.
    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(b) => format!("<{} bytes in memory>", b.len()),
            Self::Path(p) => p.display().to_string(),
        }
    }

    fn read(&self) -> PhotostripResult<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(b) => Ok(Cow::Borrowed(b.as_ref())),
            Self::Path(p) => {
                let bytes =
                    std::fs::read(p).with_context(|| format!("read '{}'", p.display()))?;
                Ok(Cow::Owned(bytes))
            }
        }
    }
}

/// Read and decode one source. One attempt, no retries.
pub fn load_source(source: &AssetSource, limits: DecodeLimits) -> PhotostripResult<PreparedImage> {
    let bytes = source.read()?;
    decode_image(&bytes, limits)
}

/// Everything decoded for one composition. Failures are already turned into warnings.
#[derive(Debug, Default)]
pub(crate) struct LoadedAssets {
    /// One slot per requested photo; `None` where loading failed.
    pub photos: Vec<Option<PreparedImage>>,
    pub frame: Option<PreparedImage>,
    /// Image stickers keyed by placement id.
    pub sticker_images: HashMap<String, PreparedImage>,
    pub warnings: Vec<CompositionWarning>,
}

/// Decode photos, the frame overlay and image stickers concurrently on `pool`.
///
/// Returns only after every load attempt has settled.
pub(crate) fn load_all(
    pool: &rayon::ThreadPool,
    photos: &[AssetSource],
    frame: Option<&AssetSource>,
    stickers: &[StickerPlacement],
    limits: DecodeLimits,
) -> LoadedAssets {
    let (photo_results, (frame_result, sticker_results)) = pool.install(|| {
        rayon::join(
            || {
                photos
                    .par_iter()
                    .map(|src| load_source(src, limits))
                    .collect::<Vec<_>>()
            },
            || {
                rayon::join(
                    || frame.map(|src| (src, load_source(src, limits))),
                    || {
                        stickers
                            .par_iter()
                            .filter_map(|p| match &p.content {
                                StickerContent::Image(src) => {
                                    Some((p.id.clone(), load_source(src, limits)))
                                }
                                StickerContent::Glyph(_) => None,
                            })
                            .collect::<Vec<_>>()
                    },
                )
            },
        )
    });

    let mut out = LoadedAssets {
        photos: Vec::with_capacity(photo_results.len()),
        ..LoadedAssets::default()
    };

    for (index, result) in photo_results.into_iter().enumerate() {
        match result {
            Ok(img) => out.photos.push(Some(img)),
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(index, %reason, "photo failed to load; leaving cell blank");
                out.warnings
                    .push(CompositionWarning::PhotoDecodeFailed { index, reason });
                out.photos.push(None);
            }
        }
    }

    match frame_result {
        Some((_, Ok(img))) => out.frame = Some(img),
        Some((src, Err(err))) => {
            let path = src.describe();
            let reason = format!("{err:#}");
            tracing::warn!(%path, %reason, "frame overlay failed to load; composing without it");
            out.warnings
                .push(CompositionWarning::FrameDecodeFailed { path, reason });
        }
        None => {}
    }

    for (sticker_id, result) in sticker_results {
        match result {
            Ok(img) => {
                out.sticker_images.insert(sticker_id, img);
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(%sticker_id, %reason, "sticker image failed to load; skipping");
                out.warnings.push(CompositionWarning::StickerRenderFailed {
                    sticker_id,
                    reason,
                });
            }
        }
    }

    out
}

/// Build the rayon pool used for decoding. `Some(0)` is rejected.
pub(crate) fn build_thread_pool(threads: Option<usize>) -> PhotostripResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(crate::PhotostripError::validation(
            "decode 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("photostrip-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| {
            crate::PhotostripError::render(format!("failed to build rayon thread pool: {e}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
