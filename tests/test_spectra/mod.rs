#![allow(dead_code)]

use rfmetrics::simulation::{PulseTrainConfig, SweepScenario};
use rfmetrics::{SpectrumSample, Spectrogram};

/// Four-bin sweep with a single carrier at 200 Hz
pub fn reference_sample() -> SpectrumSample {
    SpectrumSample::new(
        vec![100.0, 200.0, 300.0, 400.0],
        vec![-90.0, -60.0, -85.0, -95.0],
    )
    .unwrap()
}

/// Noisy two-carrier sweep for property checks
pub fn noisy_sweep_scenario(seed: u64) -> SweepScenario {
    SweepScenario {
        noise_std_db: 2.0,
        ..SweepScenario::default()
    }
    .with_tone(434.5e6, -55.0, 50.0e3)
    .with_seed(seed)
}

/// Sweep whose carrier is narrow enough that bin noise cannot move the peak
pub fn narrow_tone_scenario(seed: u64) -> SweepScenario {
    let mut scenario = SweepScenario {
        noise_std_db: 0.2,
        ..SweepScenario::default()
    }
    .with_seed(seed);
    scenario.tones[0].width_hz = 2.0e3;
    scenario
}

pub fn pulse_train_config(seed: u64) -> PulseTrainConfig {
    PulseTrainConfig {
        length: 200,
        period_samples: 20,
        offset: 5,
        noise_std_db: 0.5,
        seed: Some(seed),
        ..PulseTrainConfig::default()
    }
}

/// Spectrogram over a three-bin axis from per-capture rows
pub fn three_bin_spectrogram(rows: Vec<Vec<f64>>, timestamps: &[f64]) -> Spectrogram {
    Spectrogram::from_rows(&[100.0, 200.0, 300.0], rows, timestamps).unwrap()
}
