use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aurum", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one surface for a number of ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Print population counts of every style for one surface size, as JSON.
    Stats(StatsArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Surface style tag (starlight, nebula, motes, shimmer, waves, hero, services).
    #[arg(long, default_value = "starlight")]
    style: String,

    /// Density tag (normal, light).
    #[arg(long, default_value = "normal")]
    density: String,

    /// Logical surface width.
    #[arg(long)]
    width: f64,

    /// Logical surface height.
    #[arg(long)]
    height: f64,

    /// Number of ticks to simulate before rasterizing.
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Elapsed milliseconds per tick.
    #[arg(long, default_value_t = aurum::NOMINAL_FRAME_MS)]
    dt: f64,

    /// Device pixel ratio (capped by the configuration).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Override the configured seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image whose alpha channel supplies spring-field home points.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Leave the background transparent instead of painting the night backdrop.
    #[arg(long)]
    transparent: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Logical surface width.
    #[arg(long)]
    width: f64,

    /// Logical surface height.
    #[arg(long)]
    height: f64,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Configuration JSON to merge over the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

const BACKDROP_RGBA: [u8; 4] = [8, 8, 14, 255];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<aurum::EngineConfig> {
    let Some(path) = path else {
        return Ok(aurum::EngineConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg = aurum::EngineConfig::from_json_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate config '{}'", path.display()))?;
    Ok(cfg)
}

fn role_for(style: aurum::SurfaceStyle) -> aurum::Role {
    match style {
        aurum::SurfaceStyle::Hero => aurum::Role::Hero,
        aurum::SurfaceStyle::Services => aurum::Role::Services,
        _ => aurum::Role::Background(0),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = read_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }

    let style = aurum::SurfaceStyle::from_tag(&args.style);
    let density = aurum::Density::from_tag(&args.density);
    let layout = aurum::LayoutSize::new(args.width, args.height);
    let role = role_for(style);

    let mut desc = aurum::SurfaceDesc::new(role, layout)
        .with_style(style)
        .with_density(density)
        .with_pixel_ratio(args.dpr);

    if let Some(path) = &args.mask {
        let img = image::open(path).with_context(|| format!("open mask '{}'", path.display()))?;
        let step = match style {
            aurum::SurfaceStyle::Services => cfg.services.mask_step,
            _ => cfg.hero.mask_step,
        };
        let targets = aurum::targets_from_image(&img, layout, step, aurum::DEFAULT_THRESHOLD)
            .with_context(|| format!("sample mask '{}'", path.display()))?;
        eprintln!("mask '{}': {} targets", path.display(), targets.len());
        desc = desc.with_targets(targets);
    }

    let mut engine = aurum::Engine::new(cfg)?;
    engine.resize(std::slice::from_ref(&desc), false);
    for _ in 0..args.ticks {
        engine.animate(args.dt);
    }

    let settings = aurum::RenderSettings {
        clear_rgba: (!args.transparent).then_some(BACKDROP_RGBA),
    };
    let mut backend = aurum::create_backend(aurum::BackendKind::Cpu, &settings)?;
    let frame = engine.render(role, backend.as_mut())?;
    if frame.width == 0 || frame.height == 0 {
        anyhow::bail!("surface {}x{} has no pixels", layout.width, layout.height);
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_alpha(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({style}, {} agents)",
        args.out.display(),
        engine.population(role).unwrap_or(0)
    );
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let layout = aurum::LayoutSize::new(args.width, args.height);
    let geometry = aurum::SurfaceGeometry::unscaled(layout);

    let mut out = serde_json::Map::new();
    for style in aurum::SurfaceStyle::ALL {
        let mut counts = serde_json::Map::new();
        for density in [aurum::Density::Normal, aurum::Density::Light] {
            let mut sys = aurum::build_system(style, density, &cfg, cfg.seed, None);
            sys.resize(geometry, false);
            counts.insert(density.tag().to_string(), sys.population().into());
        }
        out.insert(style.tag().to_string(), counts.into());
    }

    let text = serde_json::to_string_pretty(&serde_json::Value::Object(out))
        .context("serialize stats")?;
    println!("{text}");
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}
