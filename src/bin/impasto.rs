use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "impasto", version, about = "Apply painterly rendering to an image.")]
struct Cli {
    /// Path of the input image.
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output PNG path (default: `<input stem>_painterly.png`).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Brush radius preset.
    #[arg(short = 'q', long, value_enum, default_value_t = QualityChoice::Medium)]
    quality: QualityChoice,

    /// Custom comma-separated radius list; overrides --quality.
    #[arg(long, value_delimiter = ',')]
    radii: Option<Vec<u32>>,

    /// Write `<input stem>_layer_<N>.png` after each completed layer.
    #[arg(short = 'l', long)]
    save_layers: bool,

    /// Verbose progress output.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Fix the stroke-shuffle RNG for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    Low,
    Medium,
    High,
}

impl From<QualityChoice> for impasto::Quality {
    fn from(c: QualityChoice) -> Self {
        match c {
            QualityChoice::Low => impasto::Quality::Low,
            QualityChoice::Medium => impasto::Quality::Medium,
            QualityChoice::High => impasto::Quality::High,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let radii: Vec<u32> = match &cli.radii {
        Some(custom) => custom.clone(),
        None => impasto::Quality::from(cli.quality).radii().to_vec(),
    };
    impasto::validate_radii(&radii)?;

    let t0 = Instant::now();
    let source = impasto::io::load_image(&cli.input)?;
    let mut canvas = impasto::Canvas::new(source.width(), source.height());

    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("painting")
        .to_string();

    let opts = impasto::RenderOpts { seed: cli.seed };
    let save_layers = cli.save_layers;
    impasto::render_with(&mut canvas, &source, &radii, &opts, |layer, canvas| {
        if save_layers {
            let path = PathBuf::from(format!("{stem}_layer_{layer}.png"));
            impasto::io::save_image(canvas.pixels(), &path)?;
            tracing::info!(path = %path.display(), "wrote layer snapshot");
        }
        Ok(())
    })?;

    let out = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{stem}_painterly.png")));
    impasto::io::save_image(canvas.pixels(), &out)
        .with_context(|| format!("save final canvas '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    tracing::info!(elapsed_s = t0.elapsed().as_secs_f32(), "done");
    Ok(())
}
