use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use std::path::{Path, PathBuf};

use rfmetrics::analysis::{
    FrequencySelection, PeakDetector, ReferenceLevel, analyze_pulses_with, bandwidth_at, drift_rate,
    drift_series, occupancy_ratio, occupied_bandwidth, time_of_occupation,
};
use rfmetrics::batch::{CaptureMetrics, characterize_all};
use rfmetrics::capture::{into_spectrogram, load_samples};
use rfmetrics::config::{AnalysisConfig, SamplingRate};
use rfmetrics::output::{CaptureAnalysis, Formatter, OutputFormat, create_formatter};
use rfmetrics::{SpectrumError, Spectrogram};

#[derive(Parser, Debug)]
#[command(name = "rfmetrics")]
#[command(about = "Characterize captured RF spectra", long_about = None)]
struct Args {
    /// JSON capture files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML analysis configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Peak height floor in dBm
    #[arg(long, allow_hyphen_values = true)]
    min_height: Option<f64>,

    /// Minimum bins between peaks
    #[arg(long)]
    min_distance: Option<usize>,

    /// Occupied-bandwidth threshold in dBm
    #[arg(long, allow_hyphen_values = true)]
    threshold: Option<f64>,

    /// Relative bandwidth level in dB below peak
    #[arg(long)]
    relative_db: Option<f64>,

    /// Time-of-occupation threshold in dBm
    #[arg(long, allow_hyphen_values = true)]
    occupation_threshold: Option<f64>,

    /// Spectrogram column to track for occupation
    #[arg(long, conflicts_with_all = ["band_low", "band_high"])]
    column: Option<usize>,

    /// Lower edge of the occupation band in Hz
    #[arg(long, requires = "band_high")]
    band_low: Option<f64>,

    /// Upper edge of the occupation band in Hz
    #[arg(long, requires = "band_low")]
    band_high: Option<f64>,

    /// Treat each capture as a pulse train and report PRF
    #[arg(long)]
    pulses: bool,

    /// Sampling rate of pulse-train captures (e.g. "1000", "48khz", "125us")
    #[arg(long)]
    sampling_rate: Option<SamplingRate>,

    /// Worker threads for multi-capture files
    #[arg(short = 'j', long, default_value_t = 1)]
    jobs: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut failures = 0;
    for path in &args.files {
        if let Err(e) = analyze_file(path, &config, formatter.as_ref(), &args) {
            failures += 1;
            eprintln!("{}: ERROR: {:#}", path.display(), e);
        }
    }

    if failures == args.files.len() {
        anyhow::bail!("no file could be analyzed");
    }
    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let mut config = match args.config {
        Some(ref path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(height) = args.min_height {
        config.peaks.min_height_dbm = Some(height);
    }
    if let Some(distance) = args.min_distance {
        config.peaks.min_distance = distance;
    }
    if let Some(threshold) = args.threshold {
        config.bandwidth.occupied_threshold_dbm = threshold;
    }
    if let Some(db) = args.relative_db {
        config.bandwidth.relative_db = db;
    }
    if let Some(threshold) = args.occupation_threshold {
        config.occupation.threshold_dbm = threshold;
    }
    if let Some(index) = args.column {
        config.occupation.selection = FrequencySelection::Column { index };
    }
    if let (Some(low_hz), Some(high_hz)) = (args.band_low, args.band_high) {
        config.occupation.selection = FrequencySelection::Band { low_hz, high_hz };
    }
    if let Some(rate) = args.sampling_rate {
        config.pulse.sampling_rate = Some(rate);
    }

    config.validate().context("Invalid analysis configuration")?;
    Ok(config)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Missing bandwidth is reported as absent, other errors propagate
fn optional_bandwidth(result: rfmetrics::Result<f64>) -> rfmetrics::Result<Option<f64>> {
    match result {
        Ok(bw) => Ok(Some(bw)),
        Err(SpectrumError::NoPointsAboveThreshold { threshold_dbm }) => {
            log::info!("no bins at or above {:.1} dBm", threshold_dbm);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn analyze_file(
    path: &Path,
    config: &AnalysisConfig,
    formatter: &dyn Formatter,
    args: &Args,
) -> anyhow::Result<()> {
    let source = display_name(path);
    let samples = load_samples(path)?;
    let metrics = characterize_all(&samples, args.jobs)?;

    let detector = PeakDetector::new(config.peaks.min_height_dbm, config.peaks.min_distance);
    for (sample, captured) in samples.iter().zip(&metrics) {
        let pulses = if args.pulses {
            Some(analyze_pulses_with(sample, &config.pulse)?)
        } else {
            None
        };

        let analysis = CaptureAnalysis {
            source: source.clone(),
            index: captured.index,
            report: captured.report,
            occupied_bandwidth_hz: optional_bandwidth(occupied_bandwidth(
                sample,
                config.bandwidth.occupied_threshold_dbm,
            ))?,
            relative_bandwidth_hz: optional_bandwidth(bandwidth_at(
                sample,
                ReferenceLevel::BelowPeak(config.bandwidth.relative_db),
            ))?,
            peaks: detector.detect(sample),
            pulses,
        };
        println!("{}", formatter.format(&analysis));
    }

    if samples.len() > 1 {
        match into_spectrogram(samples) {
            Ok(spectrogram) => print_tracking_summary(&source, &spectrogram, &metrics, config)?,
            Err(e) => log::warn!("{}: tracking skipped: {}", source, e),
        }
    }
    Ok(())
}

fn print_tracking_summary(
    source: &str,
    spectrogram: &Spectrogram,
    metrics: &[CaptureMetrics],
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let mut center_stats: Stats<f64> = Stats::new();
    let mut snr_stats: Stats<f64> = Stats::new();
    for m in metrics {
        center_stats.update(m.report.central_frequency_hz);
        snr_stats.update(m.report.snr_db);
    }

    eprintln!();
    eprintln!(
        "Tracking for {} ({} captures over {:.3}):",
        source,
        spectrogram.len(),
        spectrogram.duration()
    );
    eprintln!(
        "  Central frequency: {:.3} ± {:.3} Hz (min {:.3}, max {:.3})",
        center_stats.mean, center_stats.std_dev, center_stats.min, center_stats.max
    );
    eprintln!(
        "  SNR: {:.2} ± {:.2} dB (min {:.2}, max {:.2})",
        snr_stats.mean, snr_stats.std_dev, snr_stats.min, snr_stats.max
    );

    let drifts = drift_series(spectrogram)?;
    let drifts: Vec<String> = drifts.iter().map(|d| format!("{:+.1}", d)).collect();
    eprintln!("  Drift per capture: {} Hz", drifts.join(", "));
    if let Some(rate) = drift_rate(spectrogram)? {
        eprintln!("  Drift rate: {:+.3} Hz per time unit", rate);
    }

    let selection = config.occupation.selection;
    let threshold = config.occupation.threshold_dbm;
    match time_of_occupation(spectrogram, selection, threshold) {
        Ok(occupied) => {
            let ratio = occupancy_ratio(spectrogram, selection, threshold)?;
            eprintln!(
                "  Occupation at {:.1} dBm: {:.3} ({:.1}%)",
                threshold,
                occupied,
                ratio * 100.0
            );
        }
        Err(e @ (SpectrumError::IndexOutOfRange { .. } | SpectrumError::EmptyBand { .. })) => {
            log::warn!("{}: occupation skipped: {}", source, e);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
