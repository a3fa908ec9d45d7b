use std::borrow::Cow;

use crate::error::{Result, SpectrumError};

/// One (frequency, amplitude) bin of a sweep
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SpectrumPoint {
    pub frequency_hz: f64,
    pub amplitude_dbm: f64,
}

/// A single spectrum sweep
///
/// Holds parallel frequency (Hz) and amplitude (dBm) arrays captured at one
/// instant, plus an optional capture timestamp. Amplitudes stay in the
/// logarithmic domain; conversions to linear power go through
/// [`crate::analysis::units`].
///
/// Frequencies are expected to be non-decreasing but this is not enforced at
/// construction. Order-sensitive operations go through [`SpectrumSample::sorted`].
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumSample {
    frequency_hz: Vec<f64>,
    amplitude_dbm: Vec<f64>,
    timestamp: Option<f64>,
}

impl SpectrumSample {
    /// Create a sample from parallel frequency and amplitude arrays
    ///
    /// Fails with [`SpectrumError::InvalidSample`] when the arrays differ in
    /// length, are empty, or contain non-finite values.
    pub fn new(frequency_hz: Vec<f64>, amplitude_dbm: Vec<f64>) -> Result<Self> {
        if frequency_hz.len() != amplitude_dbm.len() {
            return Err(SpectrumError::InvalidSample(format!(
                "{} frequencies but {} amplitudes",
                frequency_hz.len(),
                amplitude_dbm.len()
            )));
        }
        if frequency_hz.is_empty() {
            return Err(SpectrumError::InvalidSample("no points".to_string()));
        }
        if let Some(i) = amplitude_dbm.iter().position(|a| !a.is_finite()) {
            return Err(SpectrumError::InvalidSample(format!(
                "non-finite amplitude {} at index {}",
                amplitude_dbm[i], i
            )));
        }
        if let Some(i) = frequency_hz.iter().position(|f| !f.is_finite()) {
            return Err(SpectrumError::InvalidSample(format!(
                "non-finite frequency {} at index {}",
                frequency_hz[i], i
            )));
        }

        Ok(Self {
            frequency_hz,
            amplitude_dbm,
            timestamp: None,
        })
    }

    /// Create a sample from a list of points
    pub fn from_points(points: &[SpectrumPoint]) -> Result<Self> {
        let (frequency_hz, amplitude_dbm) = points
            .iter()
            .map(|p| (p.frequency_hz, p.amplitude_dbm))
            .unzip();
        Self::new(frequency_hz, amplitude_dbm)
    }

    /// Attach a capture timestamp
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequency_hz
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitude_dbm
    }

    pub fn timestamp(&self) -> Option<f64> {
        self.timestamp
    }

    pub fn len(&self) -> usize {
        self.amplitude_dbm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitude_dbm.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<SpectrumPoint> {
        Some(SpectrumPoint {
            frequency_hz: *self.frequency_hz.get(index)?,
            amplitude_dbm: *self.amplitude_dbm.get(index)?,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = SpectrumPoint> + '_ {
        self.frequency_hz
            .iter()
            .zip(&self.amplitude_dbm)
            .map(|(&frequency_hz, &amplitude_dbm)| SpectrumPoint {
                frequency_hz,
                amplitude_dbm,
            })
    }

    /// True when frequencies are non-decreasing
    pub fn is_sorted(&self) -> bool {
        self.frequency_hz.windows(2).all(|w| w[0] <= w[1])
    }

    /// Frequency-ordered view of this sample
    ///
    /// Borrows `self` when already ordered. Otherwise returns a copy sorted by
    /// frequency; equal frequencies keep their original relative order.
    pub fn sorted(&self) -> Cow<'_, SpectrumSample> {
        if self.is_sorted() {
            return Cow::Borrowed(self);
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        // Stable, so ties stay in index order
        order.sort_by(|&a, &b| self.frequency_hz[a].total_cmp(&self.frequency_hz[b]));

        Cow::Owned(Self {
            frequency_hz: order.iter().map(|&i| self.frequency_hz[i]).collect(),
            amplitude_dbm: order.iter().map(|&i| self.amplitude_dbm[i]).collect(),
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_length_mismatch() {
        let err = SpectrumSample::new(vec![1.0, 2.0], vec![-50.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::InvalidSample(_)));
    }

    #[test]
    fn test_rejects_empty() {
        let err = SpectrumSample::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, SpectrumError::InvalidSample(_)));
    }

    #[test]
    fn test_rejects_non_finite_amplitude() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = SpectrumSample::new(vec![1.0, 2.0], vec![-50.0, bad]).unwrap_err();
            assert!(matches!(err, SpectrumError::InvalidSample(_)));
        }
    }

    #[test]
    fn test_sorted_borrows_ordered_input() {
        let sample = SpectrumSample::new(vec![1.0, 2.0, 2.0], vec![-3.0, -2.0, -1.0]).unwrap();
        assert!(matches!(sample.sorted(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sorted_is_stable_on_ties() {
        let sample = SpectrumSample::new(
            vec![300.0, 100.0, 200.0, 100.0],
            vec![-30.0, -10.0, -20.0, -11.0],
        )
        .unwrap()
        .with_timestamp(4.0);

        let sorted = sample.sorted();
        assert_eq!(sorted.frequencies(), &[100.0, 100.0, 200.0, 300.0]);
        assert_eq!(sorted.amplitudes(), &[-10.0, -11.0, -20.0, -30.0]);
        assert_eq!(sorted.timestamp(), Some(4.0));
    }

    #[test]
    fn test_from_points() {
        let points = [
            SpectrumPoint {
                frequency_hz: 10.0,
                amplitude_dbm: -70.0,
            },
            SpectrumPoint {
                frequency_hz: 20.0,
                amplitude_dbm: -60.0,
            },
        ];
        let sample = SpectrumSample::from_points(&points).unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.point(1), Some(points[1]));
        assert_eq!(sample.points().collect::<Vec<_>>(), points.to_vec());
    }
}
