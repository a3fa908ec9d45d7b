use crate::spectrum::SpectrumSample;

/// A detected local maximum
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PeakRecord {
    pub frequency_hz: f64,
    pub amplitude_dbm: f64,
    /// Position in the frequency-ordered sample
    pub index: usize,
}

/// Local-maximum peak detector
///
/// A point is a candidate when it is strictly greater than both neighbours
/// and at least `min_height`. Candidates closer than `min_distance` positions
/// to a stronger candidate are suppressed; on equal amplitude the lower index
/// wins. End points have only one neighbour and are never peaks.
#[derive(Debug, Clone, Copy)]
pub struct PeakDetector {
    min_height: Option<f64>,
    min_distance: usize,
}

impl PeakDetector {
    /// Create a new peak detector
    ///
    /// # Arguments
    /// * `min_height` - Absolute dBm floor, `None` for no floor
    /// * `min_distance` - Minimum index spacing between reported peaks (0 acts as 1)
    pub fn new(min_height: Option<f64>, min_distance: usize) -> Self {
        Self {
            min_height,
            min_distance: min_distance.max(1),
        }
    }

    /// Find peak indices in an amplitude buffer
    ///
    /// Returns indices in ascending order.
    pub fn find_peak_indices(&self, amplitudes: &[f64]) -> Vec<usize> {
        let candidates: Vec<usize> = amplitudes
            .windows(3)
            .enumerate()
            .filter_map(|(i, w)| {
                let above_floor = self.min_height.is_none_or(|h| w[1] >= h);
                (w[1] > w[0] && w[1] > w[2] && above_floor).then_some(i + 1)
            })
            .collect();

        if self.min_distance <= 1 || candidates.len() < 2 {
            return candidates;
        }

        // Strongest first, lower index first on ties
        let mut priority: Vec<usize> = (0..candidates.len()).collect();
        priority.sort_by(|&a, &b| {
            amplitudes[candidates[b]]
                .total_cmp(&amplitudes[candidates[a]])
                .then(a.cmp(&b))
        });

        let mut keep = vec![true; candidates.len()];
        for &c in &priority {
            if !keep[c] {
                continue;
            }
            let center = candidates[c];

            let mut j = c;
            while j > 0 && center - candidates[j - 1] < self.min_distance {
                j -= 1;
                keep[j] = false;
            }
            let mut j = c + 1;
            while j < candidates.len() && candidates[j] - center < self.min_distance {
                keep[j] = false;
                j += 1;
            }
        }

        let peaks: Vec<usize> = candidates
            .iter()
            .zip(&keep)
            .filter_map(|(&idx, &k)| k.then_some(idx))
            .collect();
        log::trace!(
            "peak suppression kept {} of {} candidates (min_distance={})",
            peaks.len(),
            candidates.len(),
            self.min_distance
        );
        peaks
    }

    /// Detect peaks in a sweep, in ascending-frequency order
    pub fn detect(&self, sample: &SpectrumSample) -> Vec<PeakRecord> {
        let sorted = sample.sorted();
        self.find_peak_indices(sorted.amplitudes())
            .into_iter()
            .map(|index| PeakRecord {
                frequency_hz: sorted.frequencies()[index],
                amplitude_dbm: sorted.amplitudes()[index],
                index,
            })
            .collect()
    }
}

/// Detect peaks in `sample`; an empty list when nothing qualifies
pub fn detect_peaks(
    sample: &SpectrumSample,
    min_height: Option<f64>,
    min_distance: usize,
) -> Vec<PeakRecord> {
    PeakDetector::new(min_height, min_distance).detect(sample)
}
