use crossbeam_channel::unbounded;

use crate::analysis::{MetricReport, characterize};
use crate::error::Result;
use crate::spectrum::SpectrumSample;

/// Metrics for one capture of a file
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CaptureMetrics {
    pub index: usize,
    pub timestamp: Option<f64>,
    pub report: MetricReport,
}

/// Characterize every capture independently
///
/// Captures need not share a frequency axis; pass `spectrogram.samples()` to
/// characterize a spectrogram. They are split across up to `workers` scoped
/// threads; results come back through a channel and are returned in capture
/// order. The first failing capture's error is returned.
pub fn characterize_all(samples: &[SpectrumSample], workers: usize) -> Result<Vec<CaptureMetrics>> {
    let workers = workers.clamp(1, samples.len().max(1));
    let chunk_size = samples.len().div_ceil(workers).max(1);

    let (tx, rx) = unbounded();
    std::thread::scope(|scope| {
        for (chunk_index, chunk) in samples.chunks(chunk_size).enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                for (offset, sample) in chunk.iter().enumerate() {
                    let index = chunk_index * chunk_size + offset;
                    // Receiver outlives the scope, send cannot fail
                    let _ = tx.send((index, characterize(sample)));
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, Result<MetricReport>)> = rx.iter().collect();
    results.sort_by_key(|(index, _)| *index);
    log::debug!(
        "characterized {} captures on {} worker(s)",
        results.len(),
        workers
    );

    results
        .into_iter()
        .map(|(index, report)| {
            report.map(|report| CaptureMetrics {
                index,
                timestamp: report.timestamp,
                report,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::Spectrogram;

    fn spectrogram(captures: usize) -> Spectrogram {
        let rows = (0..captures)
            .map(|c| {
                let mut row = vec![-90.0; 8];
                row[c % 8] = -40.0;
                row
            })
            .collect();
        let timestamps: Vec<f64> = (0..captures).map(|c| c as f64 * 0.25).collect();
        let axis: Vec<f64> = (0..8).map(|i| 1000.0 + i as f64 * 10.0).collect();
        Spectrogram::from_rows(&axis, rows, &timestamps).unwrap()
    }

    #[test]
    fn test_results_in_capture_order() {
        let spectrogram = spectrogram(11);
        let results = characterize_all(spectrogram.samples(), 4).unwrap();

        assert_eq!(results.len(), 11);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i);
            assert_eq!(result.timestamp, Some(i as f64 * 0.25));
            assert_eq!(result.report.central_frequency_hz, 1000.0 + (i % 8) as f64 * 10.0);
        }
    }

    #[test]
    fn test_matches_sequential() {
        let spectrogram = spectrogram(5);
        let parallel = characterize_all(spectrogram.samples(), 8).unwrap();
        let sequential = characterize_all(spectrogram.samples(), 1).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_captures_with_different_axes() {
        let samples = vec![
            SpectrumSample::new(vec![100.0, 200.0, 300.0], vec![-90.0, -40.0, -90.0]).unwrap(),
            SpectrumSample::new(vec![150.0, 250.0], vec![-30.0, -80.0]).unwrap(),
        ];
        assert!(Spectrogram::new(samples.clone()).is_err());

        let results = characterize_all(&samples, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].report.central_frequency_hz, 200.0);
        assert_eq!(results[1].report.central_frequency_hz, 150.0);
        assert_eq!(results[1].timestamp, None);
    }

    #[test]
    fn test_no_captures() {
        assert!(characterize_all(&[], 4).unwrap().is_empty());
    }
}
