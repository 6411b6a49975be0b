use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "speckle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scene headless and emit render parameters as JSON lines.
    Simulate(SimulateArgs),
    /// Print points sampled along a perimeter path as JSON.
    Path(PathArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scene JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scene's frame count.
    #[arg(long)]
    frames: Option<u64>,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Inset from the unit-square edges (<= 1).
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    inset: f64,

    /// Corner radius, clamped into [0, 0.5].
    #[arg(long, default_value_t = 0.18)]
    corner_radius: f64,

    /// Number of evenly spaced samples.
    #[arg(long, default_value_t = 64)]
    samples: usize,
}

#[derive(serde::Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    modified: bool,
    parameters: &'a speckle::RenderParameters,
}

#[derive(serde::Serialize)]
struct PathRecord {
    total_length: f64,
    segments: usize,
    points: Vec<speckle::Point>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Path(args) => cmd_path(args),
    }
}

fn output(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut scene = match &args.config {
        Some(path) => speckle::SceneConfig::from_path(path)?,
        None => speckle::SceneConfig::default(),
    };
    if let Some(frames) = args.frames {
        scene.frames = frames;
    }

    let mut gradient = speckle::AnimatedGradient::from_scene(&scene)?;
    gradient.initialize();

    let dt = scene.frame_delta();
    let mut out = output(args.out.as_ref())?;
    for frame in 0..scene.frames {
        let modified = gradient.tick(dt);
        let parameters = gradient.parameters();
        let record = FrameRecord {
            frame,
            modified,
            parameters: &parameters,
        };
        serde_json::to_writer(&mut out, &record).context("serialize frame")?;
        out.write_all(b"\n").context("write frame")?;
    }
    out.flush().context("flush output")?;

    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    if !(args.inset <= 1.0) {
        anyhow::bail!("inset must be <= 1, got {}", args.inset);
    }
    let mut motion = speckle::PerimeterMotion::new(speckle::PerimeterConfig {
        inset: args.inset,
        corner_radius: args.corner_radius,
        ..speckle::PerimeterConfig::default()
    });
    let path = motion.path();
    let samples = args.samples.max(1);
    let record = PathRecord {
        total_length: path.total_length(),
        segments: path.segments().len(),
        points: (0..samples)
            .map(|i| path.sample(i as f64 / samples as f64))
            .collect(),
    };

    let mut out = output(None)?;
    serde_json::to_writer_pretty(&mut out, &record).context("serialize path")?;
    out.write_all(b"\n").context("write path")?;
    out.flush().context("flush output")?;
    Ok(())
}
