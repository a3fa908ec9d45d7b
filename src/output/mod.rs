mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::analysis::{MetricReport, PeakRecord, PulseOutcome};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Everything computed for one capture
#[derive(Debug, Clone, serde::Serialize)]
pub struct CaptureAnalysis {
    pub source: String,
    pub index: usize,
    pub report: MetricReport,
    pub occupied_bandwidth_hz: Option<f64>,
    pub relative_bandwidth_hz: Option<f64>,
    pub peaks: Vec<PeakRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulses: Option<PulseOutcome>,
}

pub trait Formatter: Send {
    fn format(&self, analysis: &CaptureAnalysis) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn optional(value: Option<f64>, precision: usize, missing: &str) -> String {
    value.map_or(missing.to_string(), |v| format!("{:.*}", precision, v))
}

#[cfg(test)]
pub(crate) fn sample_analysis() -> CaptureAnalysis {
    use crate::analysis::{PulseClass, PulseReport};

    CaptureAnalysis {
        source: "sweep.json".to_string(),
        index: 2,
        report: MetricReport {
            timestamp: Some(1.5),
            central_frequency_hz: 200.0,
            noise_floor_dbm: -95.0,
            peak_amplitude_dbm: -60.0,
            average_level_dbm: -82.5,
            mean_power_dbm: -65.9,
            snr_db: 35.0,
            crest_factor_db: 5.9,
        },
        occupied_bandwidth_hz: Some(300.0),
        relative_bandwidth_hz: None,
        peaks: vec![PeakRecord {
            frequency_hz: 200.0,
            amplitude_dbm: -60.0,
            index: 1,
        }],
        pulses: Some(PulseOutcome::Detected(PulseReport {
            prf_per_sample: 0.125,
            prf_hz: Some(125.0),
            pri_samples: 8.0,
            pulse_class: PulseClass::Weak,
            peak_count: 3,
        })),
    }
}
