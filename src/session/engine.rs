use std::{path::PathBuf, sync::OnceLock};

use crate::{
    assets::{
        decode::DecodeLimits,
        frames::{FrameKind, resolve_frame},
        glyph::GlyphRasterizer,
        loader::{LoadedAssets, build_thread_pool, load_all},
        stickers::StickerContent,
    },
    effects::filter::filter_by_id,
    encode::jpeg::{encode_jpeg, human_size},
    foundation::{
        core::{Canvas, Rgba8},
        error::{CompositionWarning, PhotostripError, PhotostripResult},
    },
    layout::{
        geometry::{GeometryRegistry, ResolvedGeometry},
        spec::LAYOUTS,
    },
    render::{
        compositor::{RenderStage, Scene, StageTracker, draw_scene, filter_photos, prepare_stickers},
        surface::Surface,
    },
    session::{
        preview::PreviewSlot,
        request::{CompositionMode, CompositionRequest},
    },
};

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Root directory of frame overlays (`{asset_root}/{frame_id}/{layout_id}.png`).
    pub asset_root: PathBuf,
    /// Decode worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Canvas fill behind photos and in the borders.
    pub background: Rgba8,
    pub decode_limits: DecodeLimits,
    /// Sticker box edge at scale 1, as a fraction of the shorter canvas side.
    pub sticker_base_fraction: f64,
    /// Extra font directories searched for sticker glyphs, in addition to system fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("frames"),
            threads: None,
            background: Rgba8::WHITE,
            decode_limits: DecodeLimits::default(),
            sticker_base_fraction: 0.12,
            font_dirs: Vec::new(),
        }
    }
}

impl EngineOpts {
    /// Defaults overlaid with `PHOTOSTRIP_ASSET_ROOT` and `PHOTOSTRIP_THREADS`.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(root) = std::env::var_os("PHOTOSTRIP_ASSET_ROOT").filter(|v| !v.is_empty()) {
            opts.asset_root = PathBuf::from(root);
        }
        opts.threads = std::env::var("PHOTOSTRIP_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0);
        opts
    }

    fn validate(&self) -> PhotostripResult<()> {
        if !self.sticker_base_fraction.is_finite() || self.sticker_base_fraction <= 0.0 {
            return Err(PhotostripError::validation(
                "sticker_base_fraction must be finite and > 0",
            ));
        }
        if self.decode_limits.max_dimension == 0 {
            return Err(PhotostripError::validation(
                "decode_limits.max_dimension must be > 0",
            ));
        }
        Ok(())
    }
}

/// Un-encoded output of [`Engine::render`].
#[derive(Clone, Debug)]
pub struct RenderedComposition {
    /// Premultiplied RGBA8 canvas.
    pub surface: Surface,
    pub geometry: ResolvedGeometry,
    /// Color the canvas was filled with; the encoder flattens alpha against it.
    pub background: Rgba8,
    pub warnings: Vec<CompositionWarning>,
}

/// Encoded output of [`Engine::compose`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositionResult {
    /// JPEG bytes.
    pub encoded_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub byte_size: usize,
    /// Recoverable problems absorbed while composing.
    pub warnings: Vec<CompositionWarning>,
}

impl CompositionResult {
    /// Size label, e.g. `"1.50 MB"`.
    pub fn human_size(&self) -> String {
        human_size(self.byte_size)
    }

    /// Non-blocking messages for the person at the booth, one per warning.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.user_message()).collect()
    }
}

/// Frozen canvas size of one catalogue layout, for frame-authoring tools.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayoutDimensions {
    pub id: String,
    pub name: String,
    pub rows: u32,
    pub cols: u32,
    pub width: u32,
    pub height: u32,
    pub contract_version: u32,
}

/// Composition engine. Cheap to share; holds no per-request state.
#[derive(Debug)]
pub struct Engine {
    opts: EngineOpts,
    registry: GeometryRegistry,
    pool: rayon::ThreadPool,
    glyphs: OnceLock<GlyphRasterizer>,
}

impl Engine {
    /// Engine over the built-in geometry contract.
    pub fn new(opts: EngineOpts) -> PhotostripResult<Self> {
        Self::with_registry(opts, GeometryRegistry::builtin())
    }

    pub fn with_registry(opts: EngineOpts, registry: GeometryRegistry) -> PhotostripResult<Self> {
        opts.validate()?;
        let pool = build_thread_pool(opts.threads)?;
        Ok(Self {
            opts,
            registry,
            pool,
            glyphs: OnceLock::new(),
        })
    }

    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    pub fn registry(&self) -> &GeometryRegistry {
        &self.registry
    }

    /// Canvas sizes of every catalogue layout this engine's registry supports.
    pub fn layout_dimensions(&self) -> Vec<LayoutDimensions> {
        LAYOUTS
            .iter()
            .filter_map(|info| {
                let Canvas { width, height } = self.registry.canvas_for(&info.into()).ok()?;
                Some(LayoutDimensions {
                    id: info.id.to_string(),
                    name: info.name.to_string(),
                    rows: info.rows,
                    cols: info.cols,
                    width,
                    height,
                    contract_version: self.registry.version(),
                })
            })
            .collect()
    }

    /// Compose without encoding.
    #[tracing::instrument(skip_all, fields(layout = %request.layout.id, photos = request.photos.len()))]
    pub fn render(&self, request: &CompositionRequest) -> PhotostripResult<RenderedComposition> {
        let mut tracker = StageTracker::new(&request.layout.id);
        let out = self.render_tracked(request, &mut tracker);
        if let Err(err) = &out {
            tracker.fail(err);
        }
        out
    }

    /// Compose and encode.
    #[tracing::instrument(
        skip_all,
        fields(layout = %request.layout.id, photos = request.photos.len(), mode = ?request.mode)
    )]
    pub fn compose(&self, request: &CompositionRequest) -> PhotostripResult<CompositionResult> {
        let mut tracker = StageTracker::new(&request.layout.id);
        let out = self
            .render_tracked(request, &mut tracker)
            .and_then(|rendered| self.encode_rendered(rendered, request.quality, &mut tracker));
        match &out {
            Ok(result) => tracing::debug!(
                stage = ?tracker.stage(),
                width = result.width,
                height = result.height,
                size = %result.human_size(),
                warnings = result.warnings.len(),
                "composition done"
            ),
            Err(err) => tracker.fail(err),
        }
        out
    }

    /// Compose `request` as a preview and publish it to `slot`.
    ///
    /// Returns `Ok(false)` when a newer preview started in the meantime; the stale result is
    /// dropped, and encoding is skipped if that is already known after drawing.
    pub fn compose_preview(
        &self,
        slot: &PreviewSlot,
        request: &CompositionRequest,
    ) -> PhotostripResult<bool> {
        let generation = slot.begin();
        let request = request.clone().with_mode(CompositionMode::Preview);

        let mut tracker = StageTracker::new(&request.layout.id);
        let rendered = match self.render_tracked(&request, &mut tracker) {
            Ok(r) => r,
            Err(err) => {
                tracker.fail(&err);
                return Err(err);
            }
        };
        if !slot.is_current(generation) {
            tracing::debug!(generation = generation.get(), "preview superseded before encode");
            return Ok(false);
        }
        let result = self
            .encode_rendered(rendered, request.quality, &mut tracker)
            .inspect_err(|err| tracker.fail(err))?;
        Ok(slot.publish(generation, result))
    }

    fn glyphs(&self) -> &GlyphRasterizer {
        self.glyphs.get_or_init(|| {
            let dirs: Vec<&std::path::Path> =
                self.opts.font_dirs.iter().map(PathBuf::as_path).collect();
            GlyphRasterizer::with_system_fonts(&dirs)
        })
    }

    fn render_tracked(
        &self,
        request: &CompositionRequest,
        tracker: &mut StageTracker,
    ) -> PhotostripResult<RenderedComposition> {
        let geometry = request.validate(&self.registry)?;
        tracker.advance(RenderStage::GeometryResolved)?;

        let filter = filter_by_id(&request.filter_id);
        let frame = resolve_frame(
            &request.frame_id,
            &request.layout.id,
            request.frame_color,
            &self.opts.asset_root,
        );
        let (background, overlay) = match &frame {
            FrameKind::NoFrame => (self.opts.background, None),
            FrameKind::StyledBorder(style) => (style.color, None),
            FrameKind::ImageOverlay(src) => (self.opts.background, Some(src)),
        };

        tracker.advance(RenderStage::AssetsLoading)?;
        let LoadedAssets {
            photos,
            frame: frame_image,
            sticker_images,
            mut warnings,
        } = load_all(
            &self.pool,
            &request.photos,
            overlay,
            &request.stickers,
            self.opts.decode_limits,
        );

        tracker.advance(RenderStage::Drawing)?;
        let glyphs = request
            .stickers
            .iter()
            .any(|p| matches!(p.content, StickerContent::Glyph(_)))
            .then(|| self.glyphs());
        let (photos, stickers) = self.pool.install(|| {
            rayon::join(
                || filter_photos(&filter, photos),
                || {
                    prepare_stickers(
                        &request.stickers,
                        &sticker_images,
                        glyphs,
                        geometry.canvas,
                        self.opts.sticker_base_fraction,
                        &mut warnings,
                    )
                },
            )
        });

        let surface = draw_scene(&Scene {
            geometry: &geometry,
            background,
            photos: &photos,
            frame: frame_image.as_ref(),
            stickers: &stickers,
        })?;

        Ok(RenderedComposition {
            surface,
            geometry,
            background,
            warnings,
        })
    }

    fn encode_rendered(
        &self,
        rendered: RenderedComposition,
        quality: f32,
        tracker: &mut StageTracker,
    ) -> PhotostripResult<CompositionResult> {
        let encoded = encode_jpeg(&rendered.surface, rendered.background, quality)?;
        tracker.advance(RenderStage::Encoded)?;
        Ok(CompositionResult {
            encoded_bytes: encoded.bytes,
            width: rendered.surface.canvas.width,
            height: rendered.surface.canvas.height,
            byte_size: encoded.byte_size,
            warnings: rendered.warnings,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
