use super::{Formatter, SyncReport, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &SyncReport) -> String {
        let source = field(&report.source);
        let error = field(report.error.as_deref().unwrap_or(""));
        match report.result.as_ref() {
            Some(r) => format!(
                "{},{},{},{},{},{},{},{},{:.4},{:.4},{},{}",
                iso8601_timestamp(),
                source,
                report.sample_count,
                r.beginning,
                r.end,
                r.approx,
                r.search_window.start,
                r.search_window.end,
                r.peak,
                r.peak_to_mean,
                r.ambiguous,
                error
            ),
            None => format!(
                "{},{},{},,,,,,,,,{}",
                iso8601_timestamp(),
                source,
                report.sample_count,
                error
            ),
        }
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,source,samples,beginning,end,approx,window_start,window_end,peak,peak_to_mean,ambiguous,error",
        )
    }
}

/// Free-text field with separators and line breaks replaced
fn field(text: &str) -> String {
    text.replace(',', ";").replace(['\n', '\r'], " ")
}
