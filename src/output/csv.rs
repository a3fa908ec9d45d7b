use super::{CaptureAnalysis, Formatter, iso8601_timestamp, optional};

pub struct CsvFormatter;

/// Quote a free-text field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, analysis: &CaptureAnalysis) -> String {
        let report = &analysis.report;
        let peaks = analysis
            .peaks
            .iter()
            .map(|p| format!("{:.1}", p.frequency_hz))
            .collect::<Vec<_>>()
            .join(";");
        let pulse = analysis.pulses.as_ref().and_then(|p| p.report());
        format!(
            "{},{},{},{},{:.3},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{},{},{}",
            iso8601_timestamp(),
            escape_field(&analysis.source),
            analysis.index,
            optional(report.timestamp, 6, ""),
            report.central_frequency_hz,
            report.noise_floor_dbm,
            report.peak_amplitude_dbm,
            report.average_level_dbm,
            report.snr_db,
            report.crest_factor_db,
            optional(analysis.occupied_bandwidth_hz, 3, ""),
            optional(analysis.relative_bandwidth_hz, 3, ""),
            peaks,
            optional(pulse.and_then(|p| p.prf_hz), 3, ""),
            pulse.map_or(String::new(), |p| p.pulse_class.to_string()),
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,source,capture,timestamp,central_hz,noise_floor_dbm,peak_dbm,average_dbm,snr_db,crest_db,occupied_bw_hz,relative_bw_hz,peaks_hz,prf_hz,pulse_class",
        )
    }
}
