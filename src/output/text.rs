use crate::analysis::PulseOutcome;

use super::{CaptureAnalysis, Formatter, optional};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, analysis: &CaptureAnalysis) -> String {
        let report = &analysis.report;
        let summary = format!(
            "[{}#{}] fc: {:>14.3} Hz  peak: {:>7.2} dBm  floor: {:>7.2} dBm  SNR: {:>6.2} dB  OBW: {} Hz",
            analysis.source,
            analysis.index,
            report.central_frequency_hz,
            report.peak_amplitude_dbm,
            report.noise_floor_dbm,
            report.snr_db,
            optional(analysis.occupied_bandwidth_hz, 1, "-"),
        );
        if !self.verbose {
            return summary;
        }

        let mut lines = vec![summary];
        lines.push(format!(
            "    avg: {:.2} dBm  mean power: {:.2} dBm  crest: {:.2} dB  rel BW: {} Hz  t: {}",
            report.average_level_dbm,
            report.mean_power_dbm,
            report.crest_factor_db,
            optional(analysis.relative_bandwidth_hz, 1, "-"),
            optional(report.timestamp, 3, "-"),
        ));
        for peak in &analysis.peaks {
            lines.push(format!(
                "    peak: {:>14.3} Hz  {:>7.2} dBm  (bin {})",
                peak.frequency_hz, peak.amplitude_dbm, peak.index
            ));
        }
        match &analysis.pulses {
            Some(PulseOutcome::Detected(pulse)) => lines.push(format!(
                "    pulses: {}  PRF: {}  class: {}",
                pulse.peak_count,
                pulse.prf_hz.map_or(
                    format!("{:.4} cycles/sample", pulse.prf_per_sample),
                    |hz| format!("{:.2} Hz", hz)
                ),
                pulse.pulse_class
            )),
            Some(PulseOutcome::NoPulsesDetected { .. }) => {
                lines.push("    pulses: none detected".to_string())
            }
            None => {}
        }
        lines.join("\n")
    }
}
