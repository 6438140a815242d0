use super::{Formatter, SyncReport};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &SyncReport) -> String {
        serde_json::to_string(report)
            .unwrap_or_else(|e| format!(r#"{{"source":"{}","error":"{}"}}"#, report.source, e))
    }
}
