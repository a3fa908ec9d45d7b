mod test_spectra;

use approx::assert_relative_eq;

use rfmetrics::analysis::{PulseClass, PulseOutcome, analyze_pulses, analyze_pulses_with};
use rfmetrics::config::{PulseConfig, SamplingRate};
use rfmetrics::simulation::{PulseTrainConfig, generate_pulse_train};

#[test]
fn test_noisy_pulse_train_prf() {
    for seed in 0..8 {
        let sample = generate_pulse_train(&test_spectra::pulse_train_config(seed)).unwrap();
        let outcome = analyze_pulses(&sample, None, Some("1khz".parse().unwrap())).unwrap();
        let report = outcome.report().expect("pulses should be detected");

        assert_eq!(report.peak_count, 10, "seed {}", seed);
        assert_relative_eq!(report.pri_samples, 20.0);
        assert_relative_eq!(report.prf_hz.unwrap(), 50.0);
    }
}

#[test]
fn test_prf_scales_with_sampling_period() {
    let sample = generate_pulse_train(&test_spectra::pulse_train_config(3)).unwrap();
    let config = PulseConfig {
        sampling_rate: Some(SamplingRate::from_period_us(100.0)),
        ..PulseConfig::default()
    };
    let outcome = analyze_pulses_with(&sample, &config).unwrap();
    assert_relative_eq!(outcome.report().unwrap().prf_hz.unwrap(), 500.0);
}

#[test]
fn test_no_pulses_in_flat_noise() {
    let config = PulseTrainConfig {
        pulse_dbm: -95.0,
        noise_std_db: 0.0,
        ..test_spectra::pulse_train_config(0)
    };
    let sample = generate_pulse_train(&config).unwrap();
    assert_eq!(
        analyze_pulses(&sample, None, None).unwrap(),
        PulseOutcome::NoPulsesDetected { peak_count: 0 }
    );
}

#[test]
fn test_varying_pulses_classified_weak() {
    let mut config = test_spectra::pulse_train_config(9);
    config.noise_std_db = 3.0;
    config.floor_dbm = -120.0;
    let sample = generate_pulse_train(&config).unwrap();

    let outcome = analyze_pulses(&sample, Some(-70.0), None).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.pulse_class, PulseClass::Weak);
    assert_eq!(report.prf_hz, None);
}
