use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose photos described by a JSON manifest into a JPEG.
    Compose(ComposeArgs),
    /// Print the frozen canvas dimensions of every layout as JSON.
    Layouts,
    /// Print the filter catalogue as JSON.
    Filters,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Require a photo for every cell (final export) instead of previewing a partial set.
    #[arg(long)]
    export: bool,

    /// Decode worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Root directory of frame overlays.
    #[arg(long)]
    asset_root: Option<PathBuf>,
}

/// Manifest file. Relative paths resolve against the manifest's directory.
#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Manifest {
    layout: String,
    photos: Vec<PathBuf>,
    #[serde(default = "default_id")]
    filter: String,
    #[serde(default = "default_id")]
    frame: String,
    #[serde(default)]
    frame_color: Option<photostrip::Rgba8>,
    #[serde(default)]
    stickers: Vec<ManifestSticker>,
    #[serde(default = "default_quality")]
    quality: f32,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ManifestSticker {
    /// Catalogue sticker id.
    #[serde(default)]
    sticker: Option<String>,
    /// Free text glyph.
    #[serde(default)]
    text: Option<String>,
    /// Image file.
    #[serde(default)]
    image: Option<PathBuf>,
    #[serde(default = "default_center")]
    x: f64,
    #[serde(default = "default_center")]
    y: f64,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default)]
    rotation: f64,
}

fn default_id() -> String {
    "none".to_string()
}

fn default_quality() -> f32 {
    photostrip::DEFAULT_QUALITY
}

fn default_center() -> f64 {
    50.0
}

fn default_scale() -> f64 {
    1.0
}

#[derive(serde::Serialize)]
struct FilterRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    css: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Layouts => cmd_layouts(),
        Command::Filters => cmd_filters(),
    }
}

fn read_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    let r = BufReader::new(f);
    let manifest: Manifest = serde_json::from_reader(r).with_context(|| "parse manifest JSON")?;
    Ok(manifest)
}

fn build_request(
    manifest: Manifest,
    base: &Path,
    mode: photostrip::CompositionMode,
) -> anyhow::Result<photostrip::CompositionRequest> {
    let layout = photostrip::LayoutSpec::by_id(&manifest.layout)
        .ok_or_else(|| photostrip::PhotostripError::unsupported_layout(&manifest.layout))?;
    let photos = manifest
        .photos
        .iter()
        .map(|p| photostrip::AssetSource::Path(base.join(p)))
        .collect();

    let mut board = photostrip::StickerBoard::new();
    for (i, s) in manifest.stickers.into_iter().enumerate() {
        let content = match (s.sticker, s.text, s.image) {
            (Some(id), None, None) => {
                let info = photostrip::sticker_by_id(&id)
                    .with_context(|| format!("sticker {i}: unknown sticker id '{id}'"))?;
                photostrip::StickerContent::Glyph(info.emoji.to_string())
            }
            (None, Some(text), None) => photostrip::StickerContent::Glyph(text),
            (None, None, Some(path)) => {
                photostrip::StickerContent::Image(photostrip::AssetSource::Path(base.join(path)))
            }
            _ => anyhow::bail!("sticker {i}: set exactly one of 'sticker', 'text' or 'image'"),
        };
        let (next, id) = board.with_added(content);
        board = next
            .with_moved(&id, s.x, s.y)
            .with_scaled(&id, s.scale)
            .with_rotated(&id, s.rotation);
    }

    Ok(photostrip::CompositionRequest::new(layout, photos)
        .with_filter(manifest.filter)
        .with_frame(manifest.frame, manifest.frame_color)
        .with_stickers(board.snapshot())
        .with_quality(manifest.quality)
        .with_mode(mode))
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let manifest = read_manifest(&args.in_path)?;
    let base = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let mut opts = photostrip::EngineOpts::from_env();
    if let Some(threads) = args.threads {
        opts.threads = Some(threads);
    }
    if let Some(root) = args.asset_root {
        opts.asset_root = root;
    }
    let engine = photostrip::Engine::new(opts)?;

    let mode = if args.export {
        photostrip::CompositionMode::Export
    } else {
        photostrip::CompositionMode::Preview
    };
    let request = build_request(manifest, base, mode)?;

    let result = match engine.compose(&request) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return Err(err.into());
        }
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &result.encoded_bytes)
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    for message in result.warning_messages() {
        eprintln!("warning: {message}");
    }
    eprintln!(
        "wrote {} ({}x{}, {})",
        args.out.display(),
        result.width,
        result.height,
        result.human_size()
    );
    Ok(())
}

fn cmd_layouts() -> anyhow::Result<()> {
    let engine = photostrip::Engine::new(photostrip::EngineOpts {
        threads: Some(1),
        ..photostrip::EngineOpts::default()
    })?;
    let out = serde_json::to_string_pretty(&engine.layout_dimensions())?;
    println!("{out}");
    Ok(())
}

fn cmd_filters() -> anyhow::Result<()> {
    let rows: Vec<FilterRow> = photostrip::FILTERS
        .iter()
        .map(|f| FilterRow {
            id: f.id,
            name: f.name,
            description: f.description,
            css: photostrip::FilterSpec::from(f).to_css(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
