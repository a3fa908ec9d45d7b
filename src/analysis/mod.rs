pub mod bandwidth;
pub mod drift;
pub mod metrics;
pub mod occupation;
pub mod peak_detector;
pub mod pulse;
pub mod units;

pub use bandwidth::{ReferenceLevel, bandwidth_at, occupied_bandwidth, span_bandwidth};
pub use drift::{drift, drift_rate, drift_series, total_drift};
pub use metrics::{
    MetricReport, average_level, central_frequency, characterize, crest_factor,
    mean_power_level, noise_floor, peak_amplitude, signal_to_noise_ratio,
};
pub use occupation::{FrequencySelection, occupancy_ratio, time_of_occupation};
pub use peak_detector::{PeakDetector, PeakRecord, detect_peaks};
pub use pulse::{PulseClass, PulseOutcome, PulseReport, analyze_pulses, analyze_pulses_with};
