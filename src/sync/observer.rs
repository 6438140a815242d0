use super::SyncResult;
use crate::config::SyncParams;

/// Diagnostic side channel of the synchroniser
///
/// Every hook has an empty default body, so implementations only override
/// what they care about. The synchroniser's output never depends on the
/// observer.
pub trait SyncObserver: Send + Sync {
    fn started(&self, _params: &SyncParams, _signal_len: usize) {}

    fn coarse_estimate(&self, _approx: isize, _window: usize) {}

    fn pilot_resampled(&self, _resample: f64, _pilot_len: usize) {}

    fn located(&self, _result: &SyncResult) {}

    fn ambiguous(&self, _result: &SyncResult, _threshold: f32) {}
}

/// Observer that discards everything
pub struct NullObserver;

impl SyncObserver for NullObserver {}

/// Observer forwarding to the `log` facade
///
/// Silent unless the application installs a logger (e.g. `env_logger`).
pub struct LogObserver;

impl SyncObserver for LogObserver {
    fn started(&self, params: &SyncParams, signal_len: usize) {
        log::debug!(
            "Synchronising Zadoff-Chu sequence (root {}, length {}) with {} samples",
            params.zc_root,
            params.zc_length,
            signal_len
        );
    }

    fn coarse_estimate(&self, approx: isize, window: usize) {
        log::debug!(
            "Rolling average over {} samples puts the sequence near {}",
            window,
            approx
        );
    }

    fn pilot_resampled(&self, resample: f64, pilot_len: usize) {
        log::debug!(
            "Upsampled sequence with resample {}: new length {}",
            resample,
            pilot_len
        );
    }

    fn located(&self, result: &SyncResult) {
        log::debug!(
            "Sequence found at [{}, {}) (peak-to-mean {:.2})",
            result.beginning,
            result.end,
            result.peak_to_mean
        );
    }

    fn ambiguous(&self, result: &SyncResult, threshold: f32) {
        log::warn!(
            "Weak synchronisation peak at {}: peak-to-mean {:.2} below {:.2}",
            result.beginning,
            result.peak_to_mean,
            threshold
        );
    }
}
