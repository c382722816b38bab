use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use microcosm::{
    CaptureFormat, Capturer, Engraving, FrameRGBA, Globe, GlobeConfig, SceneKind, Stage,
    VideoContainer,
};

#[derive(Parser, Debug)]
#[command(name = "microcosm", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tick a scene headlessly and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Run the live loop and record it as a GIF or video (video requires `ffmpeg` on PATH).
    Capture(CaptureArgs),
    /// List scene ids.
    Scenes,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene id (see `microcosm scenes`). Overrides the config file.
    #[arg(long)]
    scene: Option<SceneKind>,

    /// Globe config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pedestal text (at most 20 characters are kept).
    #[arg(long)]
    text: Option<String>,

    /// Seed for the scene's random stream.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of updates before the frame is taken.
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[arg(long, value_enum, default_value_t = FormatChoice::Gif)]
    format: FormatChoice,

    /// Directory the artifact is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Gif,
    Mp4,
    Webm,
}

impl FormatChoice {
    fn format(self) -> CaptureFormat {
        match self {
            Self::Gif => CaptureFormat::gif(),
            Self::Mp4 => CaptureFormat::video(VideoContainer::Mp4),
            Self::Webm => CaptureFormat::video(VideoContainer::Webm),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Capture(args) => cmd_capture(args),
        Command::Scenes => {
            for kind in SceneKind::ALL {
                println!("{:<12} {}", kind.id(), kind.label());
            }
            Ok(())
        }
    }
}

fn load_config(args: &SceneArgs) -> anyhow::Result<GlobeConfig> {
    let mut cfg = match &args.config {
        Some(path) => GlobeConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => GlobeConfig::default(),
    };
    if let Some(scene) = args.scene {
        cfg.scene = scene;
    }
    if let Some(text) = &args.text {
        cfg.engraving = Some(Engraving::new(text));
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut globe = Globe::from_config(&cfg)?;
    globe.advance(args.ticks.saturating_sub(1));
    let frame = if args.ticks == 0 {
        globe.render()?
    } else {
        globe.tick()?
    }
    .context("render surface is not mounted")?;

    ensure_parent_dir(&args.out)?;
    let straight = unpremultiply(&frame);
    image::save_buffer_with_format(
        &args.out,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    let mut stage = Stage::globe();
    stage.show_config(&cfg)?;

    let capturer = Capturer::new();
    let artifact = capturer
        .capture(stage.tap(), cfg.scene, args.format.format())
        .context("capture failed")?;
    stage.stop()?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let path = args.out_dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("write artifact '{}'", path.display()))?;

    eprintln!(
        "wrote {} ({} frames, {})",
        path.display(),
        artifact.frames,
        artifact.mime
    );
    Ok(())
}

fn unpremultiply(frame: &FrameRGBA) -> Vec<u8> {
    let mut out = frame.data.clone();
    if !frame.premultiplied {
        return out;
    }
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
