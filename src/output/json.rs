use super::{CaptureAnalysis, Formatter, iso8601_timestamp};

pub struct JsonFormatter;

#[derive(serde::Serialize)]
struct JsonLine<'a> {
    ts: String,
    #[serde(flatten)]
    analysis: &'a CaptureAnalysis,
}

impl Formatter for JsonFormatter {
    fn format(&self, analysis: &CaptureAnalysis) -> String {
        let line = JsonLine {
            ts: iso8601_timestamp(),
            analysis,
        };
        serde_json::to_string(&line).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
