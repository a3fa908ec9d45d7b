//! Frequency span above a reference level.

use crate::error::{Result, SpectrumError};
use crate::spectrum::SpectrumSample;

use super::metrics;

/// Level a bandwidth is measured at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceLevel {
    /// Absolute level in dBm
    Absolute(f64),
    /// dB below the sweep's peak amplitude (3.0 gives the -3 dB bandwidth)
    BelowPeak(f64),
}

impl ReferenceLevel {
    /// Resolve to an absolute dBm level for `sample`
    pub fn resolve(&self, sample: &SpectrumSample) -> Result<f64> {
        match *self {
            Self::Absolute(dbm) => Ok(dbm),
            Self::BelowPeak(db) => Ok(metrics::peak_amplitude(sample)? - db),
        }
    }
}

/// Span between the lowest and highest frequency whose amplitude is at or
/// above `reference_level` dBm
///
/// A single qualifying point yields a bandwidth of zero. No qualifying point
/// is [`SpectrumError::NoPointsAboveThreshold`].
pub fn span_bandwidth(sample: &SpectrumSample, reference_level: f64) -> Result<f64> {
    let sorted = sample.sorted();
    let mut qualifying = sorted
        .points()
        .filter(|p| p.amplitude_dbm >= reference_level)
        .map(|p| p.frequency_hz);

    let Some(low) = qualifying.next() else {
        return Err(SpectrumError::NoPointsAboveThreshold {
            threshold_dbm: reference_level,
        });
    };
    let high = qualifying.last().unwrap_or(low);
    Ok(high - low)
}

/// Occupied bandwidth at a fixed absolute threshold
pub fn occupied_bandwidth(sample: &SpectrumSample, threshold_dbm: f64) -> Result<f64> {
    let bandwidth = span_bandwidth(sample, threshold_dbm)?;
    log::debug!(
        "occupied bandwidth at {:.1} dBm: {:.1} Hz",
        threshold_dbm,
        bandwidth
    );
    Ok(bandwidth)
}

/// Bandwidth at an absolute or peak-relative level
pub fn bandwidth_at(sample: &SpectrumSample, level: ReferenceLevel) -> Result<f64> {
    span_bandwidth(sample, level.resolve(sample)?)
}
