use crate::error::{Result, SyncError};
use crate::signal_processing::{Sample, argmax_first, magnitudes, uniform_filter};

/// Coarse pilot locator
///
/// Smooths the capture's magnitude with a centered moving average. The pilot
/// carries more energy than the background, so the smoothed profile peaks
/// where the averaging window covers it best. With a window of the pilot's
/// length that peak sits half a window after the pilot's first sample. A
/// longer window plateaus over every position that contains the whole pilot,
/// and the estimate is taken from the middle of that plateau.
pub struct EnvelopeEstimator {
    window: usize,
    pilot_len: usize,
}

impl EnvelopeEstimator {
    /// Create an estimator with the given averaging window length
    ///
    /// Fails with `SyncError::InvalidParameter` for a zero window.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(SyncError::invalid(
                "window",
                "averaging window length must be at least 1",
            ));
        }
        Ok(Self {
            window,
            pilot_len: window,
        })
    }

    /// Length of the pilot being located (defaults to the window length)
    pub fn with_pilot_len(mut self, pilot_len: usize) -> Self {
        self.pilot_len = pilot_len;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Plateau half-width: how far the estimate may sit from the pilot start
    /// when the window is longer than the pilot
    pub fn uncertainty(&self) -> usize {
        self.window.saturating_sub(self.pilot_len) / 2
    }

    /// Smoothed magnitude profile, same length and indexing as `signal`
    pub fn envelope<S: Sample>(&self, signal: &[S]) -> Vec<f32> {
        uniform_filter(&magnitudes(signal), self.window)
    }

    /// Approximate pilot start: `argmax(envelope) - window / 2 + uncertainty`
    ///
    /// May be negative when the envelope peaks within half a window of the
    /// capture's start. Returns `None` for an empty capture.
    pub fn coarse_estimate<S: Sample>(&self, signal: &[S]) -> Option<isize> {
        let envelope = self.envelope(signal);
        argmax_first(&envelope).map(|peak| {
            peak as isize - (self.window / 2) as isize + self.uncertainty() as isize
        })
    }
}
