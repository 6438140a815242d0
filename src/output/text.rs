use super::{Formatter, SyncReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &SyncReport) -> String {
        let Some(result) = report.result.as_ref() else {
            return format!(
                "{}: ERROR: {}",
                report.source,
                report.error.as_deref().unwrap_or("unknown error")
            );
        };

        let flag = if result.ambiguous { " (ambiguous)" } else { "" };
        if self.verbose {
            format!(
                "{}: pilot [{}, {}){} [approx: {}, window: {}..{}, len: {}, peak: {:.2}, ptm: {:.2}]",
                report.source,
                result.beginning,
                result.end,
                flag,
                result.approx,
                result.search_window.start,
                result.search_window.end,
                result.pilot_len,
                result.peak,
                result.peak_to_mean
            )
        } else {
            format!(
                "{}: pilot [{}, {}){}",
                report.source, result.beginning, result.end, flag
            )
        }
    }
}
