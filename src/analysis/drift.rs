use crate::error::Result;
use crate::spectrum::{SpectrumSample, Spectrogram};

use super::metrics::central_frequency;

/// Signed change in central frequency from `a` to `b`, in Hz
///
/// Positive means the dominant frequency moved up.
pub fn drift(sample_a: &SpectrumSample, sample_b: &SpectrumSample) -> Result<f64> {
    Ok(central_frequency(sample_b)? - central_frequency(sample_a)?)
}

/// Drift between each pair of consecutive captures
///
/// One element shorter than the spectrogram.
pub fn drift_series(spectrogram: &Spectrogram) -> Result<Vec<f64>> {
    let centers = spectrogram
        .samples()
        .iter()
        .map(central_frequency)
        .collect::<Result<Vec<_>>>()?;
    Ok(centers.windows(2).map(|w| w[1] - w[0]).collect())
}

/// Central frequency change from the first capture to the last
pub fn total_drift(spectrogram: &Spectrogram) -> Result<f64> {
    let samples = spectrogram.samples();
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => drift(first, last),
        _ => Ok(0.0),
    }
}

/// Mean drift rate in Hz per timestamp unit over the whole spectrogram
///
/// `None` for a single capture.
pub fn drift_rate(spectrogram: &Spectrogram) -> Result<Option<f64>> {
    let duration = spectrogram.duration();
    if spectrogram.len() < 2 || duration <= 0.0 {
        return Ok(None);
    }
    Ok(Some(total_drift(spectrogram)? / duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tone_at(column: usize, t: f64) -> SpectrumSample {
        let mut amps = vec![-90.0; 5];
        amps[column] = -30.0;
        SpectrumSample::new(vec![100.0, 200.0, 300.0, 400.0, 500.0], amps)
            .unwrap()
            .with_timestamp(t)
    }

    #[test]
    fn test_pairwise_sign() {
        assert_eq!(drift(&tone_at(1, 0.0), &tone_at(3, 1.0)).unwrap(), 200.0);
        assert_eq!(drift(&tone_at(3, 0.0), &tone_at(1, 1.0)).unwrap(), -200.0);
        assert_eq!(drift(&tone_at(2, 0.0), &tone_at(2, 1.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_series_is_one_shorter() {
        let spectrogram = Spectrogram::new(vec![
            tone_at(0, 0.0),
            tone_at(1, 2.0),
            tone_at(1, 4.0),
            tone_at(4, 6.0),
        ])
        .unwrap();

        assert_eq!(drift_series(&spectrogram).unwrap(), vec![100.0, 0.0, 300.0]);
        assert_eq!(total_drift(&spectrogram).unwrap(), 400.0);
        assert_relative_eq!(drift_rate(&spectrogram).unwrap().unwrap(), 400.0 / 6.0);
    }

    #[test]
    fn test_single_capture() {
        let spectrogram = Spectrogram::new(vec![tone_at(2, 0.0)]).unwrap();
        assert!(drift_series(&spectrogram).unwrap().is_empty());
        assert_eq!(drift_rate(&spectrogram).unwrap(), None);
    }
}
