use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use rfmetrics::capture::{CaptureDocument, CaptureRecord};
use rfmetrics::simulation::{
    PulseTrainConfig, SweepScenario, generate_drifting_spectrogram, generate_pulse_train,
};

#[derive(Parser, Debug)]
#[command(name = "generate_capture")]
#[command(about = "Generate synthetic JSON spectrum captures for testing")]
struct Args {
    /// TOML scenario file ([sweep] and/or [pulse] tables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = "capture.json")]
    output: PathBuf,

    /// Number of sweeps
    #[arg(short = 'n', long, default_value_t = 1)]
    captures: usize,

    /// Time between sweeps
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Tone drift per sweep in Hz
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    drift_hz: f64,

    /// Generate a single pulse train instead of sweeps
    #[arg(long)]
    pulse: bool,

    /// Seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TomlScenario {
    sweep: SweepScenario,
    pulse: PulseTrainConfig,
}

fn load_toml_config(path: &PathBuf) -> Result<TomlScenario> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario = match args.config {
        Some(ref path) => load_toml_config(path)?,
        None => TomlScenario::default(),
    };
    if args.seed.is_some() {
        scenario.sweep.seed = args.seed;
        scenario.pulse.seed = args.seed;
    }

    let document = if args.pulse {
        let sample = generate_pulse_train(&scenario.pulse)?;
        CaptureDocument::Single(CaptureRecord::from_sample(&sample))
    } else {
        let spectrogram = generate_drifting_spectrogram(
            &scenario.sweep,
            args.captures.max(1),
            args.interval,
            args.drift_hz,
        )?;
        CaptureDocument::Many {
            captures: spectrogram
                .samples()
                .iter()
                .map(CaptureRecord::from_sample)
                .collect(),
        }
    };

    let json = serde_json::to_string_pretty(&document).context("Failed to serialize captures")?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
