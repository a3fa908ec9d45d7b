mod pulse;
mod sweep;

pub use pulse::{PulseTrainConfig, generate_pulse_train};
pub use sweep::{SweepScenario, Tone, generate_drifting_spectrogram, generate_sweep};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Add zero-mean Gaussian jitter (in dB) to a set of levels
fn apply_level_noise(levels: &mut [f64], std_db: f64, rng: &mut ChaCha8Rng) {
    if std_db <= 0.0 {
        return;
    }
    let Ok(normal) = Normal::new(0.0, std_db) else {
        return;
    };
    for level in levels.iter_mut() {
        *level += normal.sample(rng);
    }
}
