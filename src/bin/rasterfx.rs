use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rasterfx::{
    AnimationRequest, ControlKind, EffectId, Engine, EngineOpts, ExportProgress,
    GifFrameEncoder, HostOrigin, RasterBuffer, Schema, Size, export_animation,
};

#[derive(Parser, Debug)]
#[command(name = "rasterfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every effect and its controls.
    List,
    /// Render one effect and write it as a PNG.
    Still(StillArgs),
    /// Capture the matrix rain effect as a looping GIF.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Input image (any format `image` can decode).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fit the image into a `WIDTHxHEIGHT` display area instead of rendering at source size.
    #[arg(long, value_parser = parse_size)]
    viewport: Option<Size>,

    /// Parameter override `key=value`; may be repeated.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// JSON file with a `{ "key": value }` object of overrides, applied before `--set`.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StillArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Effect identifier (see `rasterfx list`).
    #[arg(long, default_value = "ascii")]
    effect: EffectId,

    /// Animation clock in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Upscale 2× (nearest neighbor) before encoding.
    #[arg(long, default_value_t = false)]
    hq: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame count (defaults to the configured value).
    #[arg(long)]
    frames: Option<u32>,

    /// Per-frame delay in milliseconds (defaults to the configured value).
    #[arg(long)]
    delay: Option<u32>,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Still(args) => cmd_still(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(Size::new(w, h))
}

fn cmd_list() -> anyhow::Result<()> {
    for effect in Schema::builtin().effects() {
        println!("{} ({})", effect.id, effect.label);
        for c in &effect.controls {
            let domain = match &c.kind {
                ControlKind::Range { min, max, step } => format!("{min}..={max} step {step}"),
                ControlKind::Choice { options } => options.join(" | "),
                ControlKind::Flag => "true | false".to_owned(),
                ControlKind::Color => "#rrggbb".to_owned(),
            };
            println!("  {:<20} {:<28} default {}", c.key, domain, c.default);
        }
    }
    Ok(())
}

fn prepare_engine(source: &SourceArgs, effect: EffectId) -> anyhow::Result<Engine> {
    let opts = match &source.config {
        Some(path) => EngineOpts::from_path(path)?,
        None => EngineOpts::default(),
    };
    let mut engine = Engine::new(opts)?;

    if let Some(path) = &source.params {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read parameters '{}'", path.display()))?;
        let json: serde_json::Value =
            serde_json::from_str(&text).with_context(|| "parse parameters JSON")?;
        engine.apply_param_json(effect, &json)?;
    }
    for entry in &source.set {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("override '{entry}' is not KEY=VALUE"))?;
        engine
            .set_param_str(effect, key.trim(), value.trim())
            .with_context(|| format!("apply override '{entry}'"))?;
    }

    let img = image::open(&source.in_path)
        .with_context(|| format!("decode image '{}'", source.in_path.display()))?
        .to_rgba8();
    engine.set_viewport(source.viewport)?;
    engine.load_source(RasterBuffer::from_image(img))?;
    engine.select_effect(effect);
    Ok(engine)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let mut engine = prepare_engine(&args.source, args.effect)?;
    let report = engine.render(args.effect, args.time)?;
    if let Some(v) = report.voronoi.filter(|v| v.effective < v.requested) {
        eprintln!(
            "voronoi: {} points requested, {} rendered",
            v.requested, v.effective
        );
    }
    let bytes = engine.export_still(args.hq)?;
    write_output(&args.out, &bytes)
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut engine = prepare_engine(&args.source, EffectId::Matrix)?;
    let defaults = AnimationRequest::from_opts(&engine);
    let request = AnimationRequest {
        frame_count: args.frames.unwrap_or(defaults.frame_count),
        delay_ms: args.delay.unwrap_or(defaults.delay_ms),
    };
    let encoder = GifFrameEncoder::new(engine.opts().export.gif_speed);
    let bytes = export_animation(
        &mut engine,
        Some(encoder),
        HostOrigin::Native,
        request,
        &mut |p| match p {
            ExportProgress::Capturing { current, total, .. } => {
                tracing::debug!(current, total, "capturing");
            }
            ExportProgress::Encoding { percent } => {
                tracing::debug!(percent, "encoding");
            }
        },
    )?;
    write_output(&args.out, &bytes)
}
