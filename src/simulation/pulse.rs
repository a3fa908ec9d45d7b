use crate::error::Result;
use crate::spectrum::SpectrumSample;

use super::{apply_level_noise, create_rng};

/// Synthetic pulse train on a single bin
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PulseTrainConfig {
    /// Number of time samples
    pub length: usize,
    /// Samples between pulse starts
    pub period_samples: usize,
    /// Index of the first pulse
    pub offset: usize,
    pub pulse_dbm: f64,
    pub floor_dbm: f64,
    pub noise_std_db: f64,
    pub seed: Option<u64>,
}

impl Default for PulseTrainConfig {
    fn default() -> Self {
        Self {
            length: 200,
            period_samples: 20,
            offset: 5,
            pulse_dbm: -40.0,
            floor_dbm: -95.0,
            noise_std_db: 0.5,
            seed: None,
        }
    }
}

/// Generate a single-sample-wide pulse train; the axis is the sample index
pub fn generate_pulse_train(config: &PulseTrainConfig) -> Result<SpectrumSample> {
    let period = config.period_samples.max(1);
    let mut levels: Vec<f64> = (0..config.length)
        .map(|i| {
            if i >= config.offset && (i - config.offset) % period == 0 {
                config.pulse_dbm
            } else {
                config.floor_dbm
            }
        })
        .collect();

    let mut rng = create_rng(config.seed);
    apply_level_noise(&mut levels, config.noise_std_db, &mut rng);

    let axis = (0..config.length).map(|i| i as f64).collect();
    SpectrumSample::new(axis, levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_positions() {
        let config = PulseTrainConfig {
            length: 30,
            period_samples: 10,
            offset: 3,
            noise_std_db: 0.0,
            ..PulseTrainConfig::default()
        };
        let sample = generate_pulse_train(&config).unwrap();
        let pulses: Vec<usize> = sample
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a == config.pulse_dbm)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(pulses, vec![3, 13, 23]);
    }
}
