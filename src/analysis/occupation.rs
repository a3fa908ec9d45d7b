//! Time a frequency (or band) spends above a power threshold.
//!
//! Capture `i` is credited with the interval `[t_i, t_{i+1})` when its level
//! meets the threshold. The last capture has no following interval and adds
//! nothing.

use crate::error::{Result, SpectrumError};
use crate::spectrum::Spectrogram;

/// Which part of the frequency axis to watch
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrequencySelection {
    /// A single column of the spectrogram
    Column { index: usize },
    /// Strongest column with frequency in `[low_hz, high_hz]`
    Band { low_hz: f64, high_hz: f64 },
}

impl Default for FrequencySelection {
    fn default() -> Self {
        Self::Column { index: 0 }
    }
}

/// Per-capture level of the selected column or band
fn selected_levels(spectrogram: &Spectrogram, selection: FrequencySelection) -> Result<Vec<f64>> {
    match selection {
        FrequencySelection::Column { index } => {
            let columns = spectrogram.columns();
            if index >= columns.saturating_sub(1) {
                return Err(SpectrumError::IndexOutOfRange { index, columns });
            }
            Ok(spectrogram
                .samples()
                .iter()
                .map(|s| s.amplitudes()[index])
                .collect())
        }
        FrequencySelection::Band { low_hz, high_hz } => {
            let band = spectrogram.band_columns(low_hz, high_hz);
            if band.is_empty() {
                return Err(SpectrumError::EmptyBand { low_hz, high_hz });
            }
            Ok(spectrogram
                .samples()
                .iter()
                .map(|s| {
                    band.iter()
                        .map(|&i| s.amplitudes()[i])
                        .fold(f64::NEG_INFINITY, f64::max)
                })
                .collect())
        }
    }
}

/// Total time the selection is at or above `threshold_dbm`
///
/// Returned in the spectrogram's timestamp unit. Column indices must lie in
/// `[0, columns - 1)`.
pub fn time_of_occupation(
    spectrogram: &Spectrogram,
    selection: FrequencySelection,
    threshold_dbm: f64,
) -> Result<f64> {
    let levels = selected_levels(spectrogram, selection)?;
    let timestamps = spectrogram.timestamps();

    let occupied: f64 = levels
        .iter()
        .zip(timestamps.windows(2))
        .filter(|&(&level, _)| level >= threshold_dbm)
        .map(|(_, t)| t[1] - t[0])
        .sum();

    log::debug!(
        "{:?} occupied {:.3} of {:.3} at {:.1} dBm",
        selection,
        occupied,
        spectrogram.duration(),
        threshold_dbm
    );
    Ok(occupied)
}

/// Fraction of the spectrogram span the selection is occupied (0.0 - 1.0)
pub fn occupancy_ratio(
    spectrogram: &Spectrogram,
    selection: FrequencySelection,
    threshold_dbm: f64,
) -> Result<f64> {
    let occupied = time_of_occupation(spectrogram, selection, threshold_dbm)?;
    let duration = spectrogram.duration();
    if duration <= 0.0 {
        return Ok(0.0);
    }
    Ok(occupied / duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_captures() -> Spectrogram {
        Spectrogram::from_rows(
            &[100.0, 200.0, 300.0],
            vec![
                vec![-95.0, -90.0, -95.0],
                vec![-95.0, -50.0, -95.0],
                vec![-95.0, -90.0, -95.0],
            ],
            &[0.0, 1.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_middle_capture_occupies_one_second() {
        let occupied =
            time_of_occupation(&three_captures(), FrequencySelection::Column { index: 1 }, -60.0)
                .unwrap();
        assert_eq!(occupied, 1.0);
    }

    #[test]
    fn test_column_range() {
        let err = time_of_occupation(&three_captures(), FrequencySelection::Column { index: 2 }, -60.0)
            .unwrap_err();
        assert_eq!(err, SpectrumError::IndexOutOfRange { index: 2, columns: 3 });
    }

    #[test]
    fn test_band_uses_strongest_column() {
        let selection = FrequencySelection::Band {
            low_hz: 150.0,
            high_hz: 350.0,
        };
        assert_eq!(time_of_occupation(&three_captures(), selection, -60.0).unwrap(), 1.0);
        assert_eq!(occupancy_ratio(&three_captures(), selection, -60.0).unwrap(), 0.5);
        assert_eq!(time_of_occupation(&three_captures(), selection, -95.0).unwrap(), 2.0);
    }

    #[test]
    fn test_empty_band() {
        let selection = FrequencySelection::Band {
            low_hz: 1000.0,
            high_hz: 2000.0,
        };
        assert!(matches!(
            time_of_occupation(&three_captures(), selection, -60.0),
            Err(SpectrumError::EmptyBand { .. })
        ));
    }

    #[test]
    fn test_uneven_timestamps() {
        let spectrogram = Spectrogram::from_rows(
            &[1.0, 2.0],
            vec![vec![-10.0, 0.0], vec![-10.0, 0.0], vec![-90.0, 0.0], vec![-10.0, 0.0]],
            &[0.0, 0.5, 2.0, 2.25],
        )
        .unwrap();
        let occupied =
            time_of_occupation(&spectrogram, FrequencySelection::Column { index: 0 }, -20.0)
                .unwrap();
        assert_eq!(occupied, 2.0);
    }
}
