//! Scalar descriptive statistics over a single sweep.

use crate::error::{Result, SpectrumError};
use crate::spectrum::SpectrumSample;

use super::units;

/// Every scalar metric for one sweep
///
/// Produced once by [`characterize`] and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MetricReport {
    pub timestamp: Option<f64>,
    pub central_frequency_hz: f64,
    pub noise_floor_dbm: f64,
    pub peak_amplitude_dbm: f64,
    pub average_level_dbm: f64,
    pub mean_power_dbm: f64,
    pub snr_db: f64,
    pub crest_factor_db: f64,
}

/// Compute every scalar metric for `sample`
pub fn characterize(sample: &SpectrumSample) -> Result<MetricReport> {
    let report = MetricReport {
        timestamp: sample.timestamp(),
        central_frequency_hz: central_frequency(sample)?,
        noise_floor_dbm: noise_floor(sample)?,
        peak_amplitude_dbm: peak_amplitude(sample)?,
        average_level_dbm: average_level(sample)?,
        mean_power_dbm: mean_power_level(sample)?,
        snr_db: signal_to_noise_ratio(sample)?,
        crest_factor_db: crest_factor(sample)?,
    };
    log::debug!(
        "characterized {} points: fc={:.1} Hz, peak={:.2} dBm, snr={:.2} dB",
        sample.len(),
        report.central_frequency_hz,
        report.peak_amplitude_dbm,
        report.snr_db
    );
    Ok(report)
}

/// Frequency of the strongest bin
///
/// When several bins share the maximum amplitude the lowest frequency wins.
pub fn central_frequency(sample: &SpectrumSample) -> Result<f64> {
    let sorted = sample.sorted();
    let index = max_index(sorted.amplitudes()).ok_or(SpectrumError::EmptySample)?;
    Ok(sorted.frequencies()[index])
}

/// Lowest amplitude in the sweep, used as the noise proxy
pub fn noise_floor(sample: &SpectrumSample) -> Result<f64> {
    min_value(sample.amplitudes()).ok_or(SpectrumError::EmptySample)
}

pub fn peak_amplitude(sample: &SpectrumSample) -> Result<f64> {
    max_value(sample.amplitudes()).ok_or(SpectrumError::EmptySample)
}

/// Arithmetic mean of the dBm values
///
/// This averages logarithms, so it under-reads true average power whenever
/// levels vary. See [`mean_power_level`] for the power-domain mean.
pub fn average_level(sample: &SpectrumSample) -> Result<f64> {
    units::mean(sample.amplitudes()).ok_or(SpectrumError::EmptySample)
}

/// Mean power in dBm, averaged in milliwatts
pub fn mean_power_level(sample: &SpectrumSample) -> Result<f64> {
    units::power_mean_dbm(sample.amplitudes()).ok_or(SpectrumError::EmptySample)
}

/// Peak amplitude minus noise floor, in dB
pub fn signal_to_noise_ratio(sample: &SpectrumSample) -> Result<f64> {
    Ok(peak_amplitude(sample)? - noise_floor(sample)?)
}

/// Peak-to-RMS ratio in dB
///
/// `peak - 10*log10(mean(10^(a/10)))`, evaluated relative to the peak so that
/// levels far from 0 dBm stay finite. Zero for a flat sweep, positive
/// otherwise.
pub fn crest_factor(sample: &SpectrumSample) -> Result<f64> {
    let amplitudes = sample.amplitudes();
    if peak_amplitude(sample)? == noise_floor(sample)? {
        return Ok(0.0);
    }
    let crest = units::peak_to_mean_power_db(amplitudes).ok_or(SpectrumError::EmptySample)?;
    Ok(crest.max(0.0))
}

/// Index of the first maximum
pub(crate) fn max_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some(b) if v <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

pub(crate) fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub(crate) fn min_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}
