//! Pulse-train analysis over a single-bin time series.
//!
//! The input sample's axis is time (one bin observed repeatedly), not a
//! frequency sweep. Peaks along that axis are treated as pulses.

use std::fmt;

use crate::config::{PulseConfig, SamplingRate};
use crate::error::{Result, SpectrumError};
use crate::spectrum::SpectrumSample;

use super::peak_detector::PeakDetector;
use super::units;

/// Coarse pulse-strength label
///
/// Two-class heuristic on peak amplitudes only: `Clear` when every pulse is
/// above the mean pulse amplitude, `Weak` otherwise. This is not modulation
/// demodulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseClass {
    Clear,
    Weak,
}

impl fmt::Display for PulseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Weak => write!(f, "weak"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PulseReport {
    /// Pulse repetition frequency in cycles per sample
    pub prf_per_sample: f64,
    /// Pulse repetition frequency in Hz, only when a sampling rate was given
    pub prf_hz: Option<f64>,
    /// Mean interval between pulses in samples
    pub pri_samples: f64,
    pub pulse_class: PulseClass,
    pub peak_count: usize,
}

/// Result of a pulse analysis
///
/// Finding fewer than two pulses is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PulseOutcome {
    Detected(PulseReport),
    NoPulsesDetected { peak_count: usize },
}

impl PulseOutcome {
    pub fn report(&self) -> Option<&PulseReport> {
        match self {
            Self::Detected(report) => Some(report),
            Self::NoPulsesDetected { .. } => None,
        }
    }
}

/// Analyze a pulse train
///
/// # Arguments
/// * `time_sample` - Amplitudes of one bin over successive time steps
/// * `height` - Pulse floor in dBm; defaults to the mean amplitude
/// * `sampling_rate` - Needed for a PRF in Hz; without it only cycles per
///   sample is reported
pub fn analyze_pulses(
    time_sample: &SpectrumSample,
    height: Option<f64>,
    sampling_rate: Option<SamplingRate>,
) -> Result<PulseOutcome> {
    analyze_pulses_with(
        time_sample,
        &PulseConfig {
            height_dbm: height,
            sampling_rate,
            ..PulseConfig::default()
        },
    )
}

/// Analyze a pulse train with explicit detector settings
pub fn analyze_pulses_with(time_sample: &SpectrumSample, config: &PulseConfig) -> Result<PulseOutcome> {
    if let Some(rate) = config.sampling_rate
        && !rate.is_valid()
    {
        return Err(SpectrumError::Config(format!(
            "sampling rate must be positive, got {}",
            rate.as_hz()
        )));
    }

    let ordered = time_sample.sorted();
    let amplitudes = ordered.amplitudes();

    let height = match config.height_dbm {
        Some(h) => h,
        None => units::mean(amplitudes).ok_or(SpectrumError::EmptySample)?,
    };

    let peaks = PeakDetector::new(Some(height), config.min_distance).find_peak_indices(amplitudes);
    if peaks.len() < 2 {
        log::debug!("pulse analysis: {} peak(s) above {:.2} dBm", peaks.len(), height);
        return Ok(PulseOutcome::NoPulsesDetected {
            peak_count: peaks.len(),
        });
    }

    let intervals: Vec<f64> = peaks.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let pri_samples = units::mean(&intervals).ok_or(SpectrumError::EmptySample)?;
    let prf_per_sample = 1.0 / pri_samples;
    let prf_hz = config.sampling_rate.map(|rate| rate.as_hz() / pri_samples);

    let pulse_amplitudes: Vec<f64> = peaks.iter().map(|&i| amplitudes[i]).collect();
    let pulse_class = classify_pulses(&pulse_amplitudes);

    log::debug!(
        "pulse analysis: {} pulses, PRI {:.2} samples, class {}",
        peaks.len(),
        pri_samples,
        pulse_class
    );

    Ok(PulseOutcome::Detected(PulseReport {
        prf_per_sample,
        prf_hz,
        pri_samples,
        pulse_class,
        peak_count: peaks.len(),
    }))
}

fn classify_pulses(pulse_amplitudes: &[f64]) -> PulseClass {
    let Some(mean) = units::mean(pulse_amplitudes) else {
        return PulseClass::Weak;
    };
    if pulse_amplitudes.iter().all(|&a| a > mean) {
        PulseClass::Clear
    } else {
        PulseClass::Weak
    }
}
