use crate::error::{Result, SpectrumError};

use super::SpectrumSample;

/// Time-ordered sequence of sweeps over one frequency axis
///
/// Every capture has the same length, pointwise-equal frequencies, and a
/// timestamp strictly greater than the previous capture's.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrogram {
    samples: Vec<SpectrumSample>,
}

impl Spectrogram {
    /// Build a spectrogram from timestamped captures
    ///
    /// Fails with [`SpectrumError::InvalidAxis`] if the captures disagree on
    /// the frequency axis or timestamps are missing or not increasing.
    pub fn new(samples: Vec<SpectrumSample>) -> Result<Self> {
        let Some(first) = samples.first() else {
            return Err(SpectrumError::InvalidAxis("no captures".to_string()));
        };
        let axis = first.frequencies();

        let mut last_timestamp: Option<f64> = None;
        for (i, sample) in samples.iter().enumerate() {
            if sample.frequencies() != axis {
                return Err(SpectrumError::InvalidAxis(format!(
                    "capture {} does not share the frequency axis of capture 0",
                    i
                )));
            }

            let Some(timestamp) = sample.timestamp() else {
                return Err(SpectrumError::InvalidAxis(format!(
                    "capture {} has no timestamp",
                    i
                )));
            };
            if !timestamp.is_finite() {
                return Err(SpectrumError::InvalidAxis(format!(
                    "capture {} has non-finite timestamp",
                    i
                )));
            }
            if let Some(prev) = last_timestamp
                && timestamp <= prev
            {
                return Err(SpectrumError::InvalidAxis(format!(
                    "capture {} timestamp {} does not follow {}",
                    i, timestamp, prev
                )));
            }
            last_timestamp = Some(timestamp);
        }

        Ok(Self { samples })
    }

    /// Build a spectrogram from a shared axis, one amplitude row per capture,
    /// and one timestamp per row
    pub fn from_rows(
        frequency_hz: &[f64],
        rows: Vec<Vec<f64>>,
        timestamps: &[f64],
    ) -> Result<Self> {
        if rows.len() != timestamps.len() {
            return Err(SpectrumError::InvalidAxis(format!(
                "{} rows but {} timestamps",
                rows.len(),
                timestamps.len()
            )));
        }

        let samples = rows
            .into_iter()
            .zip(timestamps)
            .map(|(row, &t)| {
                SpectrumSample::new(frequency_hz.to_vec(), row).map(|s| s.with_timestamp(t))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(samples)
    }

    pub fn samples(&self) -> &[SpectrumSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Shared frequency axis
    pub fn frequencies(&self) -> &[f64] {
        self.samples[0].frequencies()
    }

    /// Number of frequency columns
    pub fn columns(&self) -> usize {
        self.samples[0].len()
    }

    /// Capture timestamps, in order
    pub fn timestamps(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.timestamp().unwrap_or_default())
            .collect()
    }

    /// Time between the first and last capture
    pub fn duration(&self) -> f64 {
        let timestamps = self.timestamps();
        match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Amplitude of one column across all captures
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.columns() {
            return None;
        }
        Some(self.samples.iter().map(|s| s.amplitudes()[index]).collect())
    }

    /// Indices of the columns whose frequency lies in `[low_hz, high_hz]`
    pub fn band_columns(&self, low_hz: f64, high_hz: f64) -> Vec<usize> {
        self.frequencies()
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f >= low_hz && f <= high_hz)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(amps: Vec<f64>, t: f64) -> SpectrumSample {
        SpectrumSample::new(vec![100.0, 200.0, 300.0], amps)
            .unwrap()
            .with_timestamp(t)
    }

    #[test]
    fn test_accepts_consistent_captures() {
        let spectrogram = Spectrogram::new(vec![
            capture(vec![-90.0, -60.0, -85.0], 0.0),
            capture(vec![-91.0, -61.0, -86.0], 0.5),
        ])
        .unwrap();

        assert_eq!(spectrogram.len(), 2);
        assert_eq!(spectrogram.columns(), 3);
        assert_eq!(spectrogram.column(1), Some(vec![-60.0, -61.0]));
        assert_eq!(spectrogram.column(3), None);
        assert_eq!(spectrogram.duration(), 0.5);
    }

    #[test]
    fn test_rejects_axis_mismatch() {
        let other = SpectrumSample::new(vec![100.0, 200.0, 301.0], vec![-1.0, -2.0, -3.0])
            .unwrap()
            .with_timestamp(1.0);
        let err = Spectrogram::new(vec![capture(vec![-1.0, -2.0, -3.0], 0.0), other]).unwrap_err();
        assert!(matches!(err, SpectrumError::InvalidAxis(_)));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let short = SpectrumSample::new(vec![100.0, 200.0], vec![-1.0, -2.0])
            .unwrap()
            .with_timestamp(1.0);
        let err = Spectrogram::new(vec![capture(vec![-1.0, -2.0, -3.0], 0.0), short]).unwrap_err();
        assert!(matches!(err, SpectrumError::InvalidAxis(_)));
    }

    #[test]
    fn test_rejects_missing_or_repeated_timestamps() {
        let untimed = SpectrumSample::new(vec![100.0, 200.0, 300.0], vec![-1.0, -2.0, -3.0]).unwrap();
        assert!(Spectrogram::new(vec![untimed]).is_err());

        let err = Spectrogram::new(vec![
            capture(vec![-1.0, -2.0, -3.0], 1.0),
            capture(vec![-1.0, -2.0, -3.0], 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, SpectrumError::InvalidAxis(_)));
    }

    #[test]
    fn test_from_rows_and_band_columns() {
        let spectrogram = Spectrogram::from_rows(
            &[100.0, 200.0, 300.0, 400.0],
            vec![vec![-1.0; 4], vec![-2.0; 4]],
            &[0.0, 1.0],
        )
        .unwrap();

        assert_eq!(spectrogram.band_columns(150.0, 300.0), vec![1, 2]);
        assert!(spectrogram.band_columns(401.0, 500.0).is_empty());
        assert!(Spectrogram::from_rows(&[1.0], vec![vec![-1.0]], &[0.0, 1.0]).is_err());
    }
}
