//! Two-stage Zadoff-Chu synchronisation.
//!
//! 1. [`EnvelopeEstimator`] finds the approximate pilot position from a
//!    moving average of the capture's magnitude.
//! 2. [`WindowedCorrelator`] cross-correlates a window around that position
//!    against the zero-order-hold resampled pilot and picks the best lag.
//!
//! [`Synchroniser`] validates the parameters, runs both stages, converts the
//! window-local lag into a global sample index and reports how clearly the
//! correlation peak stands out.

mod correlator;
mod envelope;
mod observer;

pub use correlator::{FineEstimate, SearchWindow, WindowedCorrelator};
pub use envelope::EnvelopeEstimator;
pub use observer::{LogObserver, NullObserver, SyncObserver};

use serde::Serialize;

use crate::config::{EnvelopeWindow, SyncConfig, SyncParams};
use crate::error::{Result, SyncError};
use crate::pilot::zadoff_chu;
use crate::signal_processing::{Sample, resampled_len, upsample_hold};

/// Location of the pilot within a capture
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncResult {
    /// Global index of the pilot's first sample
    pub beginning: isize,
    /// Index one past the pilot's last sample (`beginning + pilot_len`)
    pub end: isize,
    /// Coarse estimate from the envelope stage
    pub approx: isize,
    /// Averaging window used by the envelope stage
    pub envelope_window: usize,
    /// Range searched by the correlation stage
    pub search_window: SearchWindow,
    /// Length of the resampled pilot
    pub pilot_len: usize,
    /// Correlation score at the chosen lag
    pub peak: f32,
    /// Peak score over the mean score of the search window
    pub peak_to_mean: f32,
    /// Set when `peak_to_mean` fell below the configured minimum
    pub ambiguous: bool,
}

impl SyncResult {
    /// `(beginning, end)` pair
    pub fn bounds(&self) -> (isize, isize) {
        (self.beginning, self.end)
    }
}

/// Zadoff-Chu pilot synchroniser
///
/// Holds no per-capture state: one instance can serve any number of
/// captures, from any number of threads.
///
/// # Example
/// ```
/// use num_complex::Complex32;
/// use zcsync::{SyncParams, Synchroniser};
/// use zcsync::pilot::zadoff_chu;
///
/// let pilot = zadoff_chu(5, 63);
/// let mut capture = vec![Complex32::new(0.0, 0.0); 1000];
/// capture[400..463].copy_from_slice(&pilot);
///
/// let result = Synchroniser::default()
///     .synchronise(&capture, &SyncParams::new(5, 63))
///     .unwrap();
/// assert_eq!(result.bounds(), (400, 463));
/// ```
pub struct Synchroniser {
    config: SyncConfig,
    observer: Box<dyn SyncObserver>,
}

impl Default for Synchroniser {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

impl Synchroniser {
    /// Create a synchroniser reporting through the `log` facade
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            observer: Box::new(LogObserver),
        }
    }

    /// Replace the diagnostic observer
    pub fn with_observer(mut self, observer: impl SyncObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Locate the pilot described by `params` in `signal`
    ///
    /// # Errors
    /// * `SyncError::InvalidParameter` - zero `zc_length`, non-positive
    ///   `resample`, empty `signal`, or a derived window or pilot length of
    ///   zero; reported before any processing
    /// * `SyncError::AmbiguousResult` - weak correlation peak while
    ///   `ambiguity.reject` is set
    /// * `SyncError::EmptySearchWindow` - the coarse estimate lies so far
    ///   outside the capture that no samples remain to correlate
    pub fn synchronise<S: Sample>(&self, signal: &[S], params: &SyncParams) -> Result<SyncResult> {
        let (window, pilot_len) = self.validate(signal.len(), params)?;
        self.observer.started(params, signal.len());

        let estimator = EnvelopeEstimator::new(window)?.with_pilot_len(pilot_len);
        let approx = estimator
            .coarse_estimate(signal)
            .ok_or_else(|| SyncError::invalid("signal", "signal must not be empty"))?;
        self.observer.coarse_estimate(approx, window);

        let pilot = upsample_hold(&zadoff_chu(params.zc_root, params.zc_length), params.resample);
        debug_assert_eq!(pilot.len(), pilot_len);
        self.observer.pilot_resampled(params.resample, pilot.len());

        // A window longer than the pilot blurs the estimate by up to its
        // plateau half-width
        let min_margin = if window > pilot.len() {
            window + pilot.len()
        } else {
            0
        };
        let fine = WindowedCorrelator::new(&pilot, params.use_abs)
            .with_search_span(self.config.correlation.search_span)
            .with_min_margin(min_margin)
            .locate(signal, approx)?;

        let threshold = self.config.ambiguity.min_peak_to_mean;
        let result = SyncResult {
            beginning: fine.beginning,
            end: fine.end,
            approx,
            envelope_window: window,
            search_window: fine.window,
            pilot_len: pilot.len(),
            peak: fine.peak,
            peak_to_mean: fine.peak_to_mean,
            ambiguous: fine.peak_to_mean < threshold,
        };

        if result.ambiguous {
            self.observer.ambiguous(&result, threshold);
            if self.config.ambiguity.reject {
                return Err(SyncError::AmbiguousResult {
                    peak_to_mean: result.peak_to_mean,
                    threshold,
                });
            }
        }

        self.observer.located(&result);
        Ok(result)
    }

    /// Check parameters and derive `(envelope window, pilot length)`
    fn validate(&self, signal_len: usize, params: &SyncParams) -> Result<(usize, usize)> {
        if params.zc_length == 0 {
            return Err(SyncError::invalid("zc_length", "must be positive"));
        }
        if !params.resample.is_finite() || params.resample <= 0.0 {
            return Err(SyncError::invalid(
                "resample",
                format!("must be a positive number, got {}", params.resample),
            ));
        }
        if signal_len == 0 {
            return Err(SyncError::invalid("signal", "signal must not be empty"));
        }

        let pilot_len = resampled_len(params.zc_length, params.resample);
        if pilot_len == 0 {
            return Err(SyncError::invalid(
                "resample",
                format!(
                    "zc_length * resample = {} rounds to an empty pilot",
                    params.zc_length as f64 * params.resample
                ),
            ));
        }

        let window = match self.config.envelope.window {
            EnvelopeWindow::PilotLength => pilot_len,
            EnvelopeWindow::SignalFraction => {
                if params.ratio_approx == 0 {
                    return Err(SyncError::invalid("ratio_approx", "must be positive"));
                }
                (signal_len as f64 / params.ratio_approx as f64).round() as usize
            }
        };
        if window == 0 {
            return Err(SyncError::invalid(
                "window",
                "derived averaging window length is zero",
            ));
        }

        Ok((window, pilot_len))
    }
}

/// Locate a pilot with the default configuration
///
/// Shorthand for `Synchroniser::default().synchronise(signal, params)`.
pub fn synchronise<S: Sample>(signal: &[S], params: &SyncParams) -> Result<SyncResult> {
    Synchroniser::default().synchronise(signal, params)
}
