use crate::analysis::units::{dbm_to_milliwatts, milliwatts_to_dbm};
use crate::error::Result;
use crate::spectrum::{SpectrumSample, Spectrogram};

use super::{apply_level_noise, create_rng};

/// A carrier with a Gaussian power profile
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Tone {
    pub frequency_hz: f64,
    pub amplitude_dbm: f64,
    /// Standard deviation of the power profile in Hz
    pub width_hz: f64,
}

/// Synthetic sweep description
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SweepScenario {
    pub start_hz: f64,
    pub stop_hz: f64,
    pub points: usize,
    pub noise_floor_dbm: f64,
    /// Gaussian jitter on every bin, in dB
    pub noise_std_db: f64,
    pub tones: Vec<Tone>,
    pub seed: Option<u64>,
}

impl Default for SweepScenario {
    fn default() -> Self {
        Self {
            start_hz: 433.0e6,
            stop_hz: 435.0e6,
            points: 401,
            noise_floor_dbm: -100.0,
            noise_std_db: 1.0,
            tones: vec![Tone {
                frequency_hz: 433.92e6,
                amplitude_dbm: -40.0,
                width_hz: 20.0e3,
            }],
            seed: None,
        }
    }
}

impl SweepScenario {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tone(mut self, frequency_hz: f64, amplitude_dbm: f64, width_hz: f64) -> Self {
        self.tones.push(Tone {
            frequency_hz,
            amplitude_dbm,
            width_hz,
        });
        self
    }

    pub fn without_noise(mut self) -> Self {
        self.noise_std_db = 0.0;
        self
    }

    fn axis(&self) -> Vec<f64> {
        let points = self.points.max(2);
        let step = (self.stop_hz - self.start_hz) / (points - 1) as f64;
        (0..points).map(|i| self.start_hz + i as f64 * step).collect()
    }
}

/// Power-sum tones over a flat noise floor
fn levels(axis: &[f64], floor_dbm: f64, tones: &[Tone], offset_hz: f64) -> Vec<f64> {
    let floor_mw = dbm_to_milliwatts(floor_dbm);
    axis.iter()
        .map(|&f| {
            let tone_mw: f64 = tones
                .iter()
                .map(|t| {
                    let x = (f - t.frequency_hz - offset_hz) / t.width_hz.max(f64::MIN_POSITIVE);
                    dbm_to_milliwatts(t.amplitude_dbm) * (-0.5 * x * x).exp()
                })
                .sum();
            milliwatts_to_dbm(floor_mw + tone_mw)
        })
        .collect()
}

/// Generate one sweep
pub fn generate_sweep(scenario: &SweepScenario) -> Result<SpectrumSample> {
    let axis = scenario.axis();
    let mut amplitudes = levels(&axis, scenario.noise_floor_dbm, &scenario.tones, 0.0);
    let mut rng = create_rng(scenario.seed);
    apply_level_noise(&mut amplitudes, scenario.noise_std_db, &mut rng);
    SpectrumSample::new(axis, amplitudes)
}

/// Generate `captures` sweeps whose tones move by `drift_hz_per_capture`
/// each capture, spaced `interval` time units apart starting at 0
pub fn generate_drifting_spectrogram(
    scenario: &SweepScenario,
    captures: usize,
    interval: f64,
    drift_hz_per_capture: f64,
) -> Result<Spectrogram> {
    let axis = scenario.axis();
    let mut rng = create_rng(scenario.seed);

    let samples = (0..captures)
        .map(|k| {
            let offset = drift_hz_per_capture * k as f64;
            let mut amplitudes = levels(&axis, scenario.noise_floor_dbm, &scenario.tones, offset);
            apply_level_noise(&mut amplitudes, scenario.noise_std_db, &mut rng);
            SpectrumSample::new(axis.clone(), amplitudes).map(|s| s.with_timestamp(k as f64 * interval))
        })
        .collect::<Result<Vec<_>>>()?;

    Spectrogram::new(samples)
}
