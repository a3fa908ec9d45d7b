//! JSON capture documents for the command-line tools.
//!
//! A document is either one capture object or `{"captures": [...]}`:
//!
//! ```json
//! {"timestamp": 0.0, "frequency_hz": [100.0, 200.0], "amplitude_dbm": [-90.0, -60.0]}
//! ```

use std::path::Path;

use anyhow::Context;

use crate::spectrum::{SpectrumSample, Spectrogram};

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct CaptureRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub frequency_hz: Vec<f64>,
    pub amplitude_dbm: Vec<f64>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum CaptureDocument {
    Many { captures: Vec<CaptureRecord> },
    Single(CaptureRecord),
}

impl CaptureRecord {
    pub fn from_sample(sample: &SpectrumSample) -> Self {
        Self {
            timestamp: sample.timestamp(),
            frequency_hz: sample.frequencies().to_vec(),
            amplitude_dbm: sample.amplitudes().to_vec(),
        }
    }

    pub fn into_sample(self) -> crate::Result<SpectrumSample> {
        let sample = SpectrumSample::new(self.frequency_hz, self.amplitude_dbm)?;
        Ok(match self.timestamp {
            Some(t) => sample.with_timestamp(t),
            None => sample,
        })
    }
}

impl CaptureDocument {
    pub fn into_samples(self) -> anyhow::Result<Vec<SpectrumSample>> {
        let records = match self {
            Self::Many { captures } => captures,
            Self::Single(record) => vec![record],
        };
        records
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_sample().with_context(|| format!("capture {}", i)))
            .collect()
    }
}

/// Read every capture in a JSON document
pub fn load_samples<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<SpectrumSample>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: CaptureDocument = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    document.into_samples()
}

/// Assemble loaded captures into a spectrogram
///
/// Captures without timestamps are numbered 0, 1, 2, ... in file order.
pub fn into_spectrogram(samples: Vec<SpectrumSample>) -> crate::Result<Spectrogram> {
    let untimed = samples.iter().all(|s| s.timestamp().is_none());
    let samples = if untimed {
        samples
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.with_timestamp(i as f64))
            .collect()
    } else {
        samples
    };
    Spectrogram::new(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_capture_document() {
        let doc: CaptureDocument = serde_json::from_str(
            r#"{"frequency_hz": [100.0, 200.0], "amplitude_dbm": [-90.0, -60.0]}"#,
        )
        .unwrap();
        let samples = doc.into_samples().unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp(), None);
    }

    #[test]
    fn test_many_capture_document() {
        let doc: CaptureDocument = serde_json::from_str(
            r#"{"captures": [
                {"timestamp": 0.0, "frequency_hz": [1.0, 2.0], "amplitude_dbm": [-1.0, -2.0]},
                {"timestamp": 0.5, "frequency_hz": [1.0, 2.0], "amplitude_dbm": [-3.0, -4.0]}
            ]}"#,
        )
        .unwrap();
        let spectrogram = into_spectrogram(doc.into_samples().unwrap()).unwrap();
        assert_eq!(spectrogram.timestamps(), vec![0.0, 0.5]);
    }

    #[test]
    fn test_bad_capture_is_reported() {
        let doc: CaptureDocument = serde_json::from_str(
            r#"{"frequency_hz": [100.0], "amplitude_dbm": [-90.0, -60.0]}"#,
        )
        .unwrap();
        assert!(doc.into_samples().is_err());
    }

    #[test]
    fn test_mixed_axes_still_characterize() {
        let doc: CaptureDocument = serde_json::from_str(
            r#"{"captures": [
                {"frequency_hz": [1.0, 2.0, 3.0], "amplitude_dbm": [-9.0, -1.0, -9.0]},
                {"frequency_hz": [5.0, 6.0], "amplitude_dbm": [-2.0, -8.0]}
            ]}"#,
        )
        .unwrap();
        let samples = doc.into_samples().unwrap();

        let metrics = crate::batch::characterize_all(&samples, 2).unwrap();
        assert_eq!(metrics[0].report.central_frequency_hz, 2.0);
        assert_eq!(metrics[1].report.central_frequency_hz, 5.0);
        assert!(matches!(
            into_spectrogram(samples),
            Err(crate::SpectrumError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_untimed_captures_are_numbered() {
        let samples = vec![
            SpectrumSample::new(vec![1.0], vec![-1.0]).unwrap(),
            SpectrumSample::new(vec![1.0], vec![-2.0]).unwrap(),
        ];
        let spectrogram = into_spectrogram(samples).unwrap();
        assert_eq!(spectrogram.timestamps(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_record_round_trip_keeps_timestamp() {
        let sample = SpectrumSample::new(vec![1.0, 2.0], vec![-5.0, -6.0])
            .unwrap()
            .with_timestamp(3.0);
        let restored = CaptureRecord::from_sample(&sample).into_sample().unwrap();
        assert_eq!(restored, sample);
    }
}
