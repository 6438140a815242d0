use num_complex::Complex32;
use serde::Serialize;

use crate::constants::DEFAULT_SEARCH_SPAN;
use crate::error::{Result, SyncError};
use crate::signal_processing::{
    Sample, argmax_first, correlate_same, correlate_same_real, correlation_lags_same, magnitudes,
    peak_to_mean,
};

/// Half-open range of capture indices searched by the correlator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchWindow {
    pub start: usize,
    pub end: usize,
}

impl SearchWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Precise pilot location produced by [`WindowedCorrelator::locate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FineEstimate {
    /// Global index of the pilot's first sample
    pub beginning: isize,
    /// `beginning` plus the pilot length
    pub end: isize,
    /// Lag of the correlation peak, relative to the window start
    pub best_lag: isize,
    pub window: SearchWindow,
    /// Correlation score at the peak
    pub peak: f32,
    /// Peak score divided by the mean score across the window
    pub peak_to_mean: f32,
}

/// Fine pilot locator
///
/// Cross-correlates a window of `±span` pilot lengths around the coarse
/// estimate against the resampled pilot and takes the lag of the strongest
/// match. With `use_abs` the magnitudes are correlated, which tolerates an
/// unknown carrier phase; otherwise raw samples are correlated coherently and
/// the correlation magnitude is scored.
pub struct WindowedCorrelator<'a> {
    pilot: &'a [Complex32],
    use_abs: bool,
    search_span: usize,
    min_margin: usize,
}

impl<'a> WindowedCorrelator<'a> {
    pub fn new(pilot: &'a [Complex32], use_abs: bool) -> Self {
        Self {
            pilot,
            use_abs,
            search_span: DEFAULT_SEARCH_SPAN,
            min_margin: 0,
        }
    }

    /// Override the window half-width, in pilot lengths (at least 1)
    pub fn with_search_span(mut self, search_span: usize) -> Self {
        self.search_span = search_span.max(1);
        self
    }

    /// Widen the window to at least `min_margin` samples on each side
    pub fn with_min_margin(mut self, min_margin: usize) -> Self {
        self.min_margin = min_margin;
        self
    }

    pub fn pilot_len(&self) -> usize {
        self.pilot.len()
    }

    /// `[max(approx - m, 0), min(approx + m, signal_len))` with
    /// `m = max(span*n, min_margin)`
    pub fn search_window(&self, signal_len: usize, approx: isize) -> SearchWindow {
        let margin = (self.search_span * self.pilot.len()).max(self.min_margin) as isize;
        let start = (approx - margin).clamp(0, signal_len as isize) as usize;
        let end = (approx + margin).clamp(0, signal_len as isize) as usize;
        SearchWindow {
            start,
            end: end.max(start),
        }
    }

    /// Locate the pilot near `approx`
    ///
    /// Fails with `SyncError::EmptySearchWindow` when the window around
    /// `approx` holds no samples.
    pub fn locate<S: Sample>(&self, signal: &[S], approx: isize) -> Result<FineEstimate> {
        let window = self.search_window(signal.len(), approx);
        let windowed = &signal[window.start..window.end];

        let scores = self.scores(windowed);
        let lags = correlation_lags_same(windowed.len(), self.pilot.len());

        let best = argmax_first(&scores).ok_or(SyncError::EmptySearchWindow {
            approx,
            signal_len: signal.len(),
        })?;

        let best_lag = lags[best];
        let beginning = best_lag + window.start as isize;
        let peak = scores[best];

        Ok(FineEstimate {
            beginning,
            end: beginning + self.pilot.len() as isize,
            best_lag,
            window,
            peak,
            peak_to_mean: peak_to_mean(&scores, peak),
        })
    }

    fn scores<S: Sample>(&self, windowed: &[S]) -> Vec<f32> {
        if self.use_abs {
            correlate_same_real(&magnitudes(windowed), &magnitudes(self.pilot))
        } else {
            let windowed: Vec<Complex32> = windowed.iter().map(|&s| s.to_complex()).collect();
            correlate_same(&windowed, self.pilot)
                .iter()
                .map(|c| c.norm())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pilot::zadoff_chu;

    fn embed(pilot: &[Complex32], offset: usize, len: usize) -> Vec<Complex32> {
        let mut signal = vec![Complex32::new(0.0, 0.0); len];
        signal[offset..offset + pilot.len()].copy_from_slice(pilot);
        signal
    }

    #[test]
    fn test_search_window_clipping() {
        let pilot = zadoff_chu(1, 10);
        let correlator = WindowedCorrelator::new(&pilot, true);

        assert_eq!(
            correlator.search_window(200, 100),
            SearchWindow { start: 80, end: 120 }
        );
        assert_eq!(
            correlator.search_window(200, 5),
            SearchWindow { start: 0, end: 25 }
        );
        assert_eq!(
            correlator.search_window(200, 190),
            SearchWindow { start: 170, end: 200 }
        );
        assert_eq!(
            correlator.search_window(200, -7),
            SearchWindow { start: 0, end: 13 }
        );
        assert!(correlator.search_window(200, -30).is_empty());
    }

    #[test]
    fn test_search_span_override() {
        let pilot = zadoff_chu(1, 10);
        let correlator = WindowedCorrelator::new(&pilot, true).with_search_span(3);
        assert_eq!(
            correlator.search_window(500, 100),
            SearchWindow { start: 70, end: 130 }
        );
        let correlator = WindowedCorrelator::new(&pilot, true).with_search_span(0);
        assert_eq!(correlator.search_window(500, 100).len(), 20);
    }

    #[test]
    fn test_min_margin_widens_window() {
        let pilot = zadoff_chu(1, 10);
        let correlator = WindowedCorrelator::new(&pilot, true).with_min_margin(50);
        assert_eq!(
            correlator.search_window(500, 100),
            SearchWindow { start: 50, end: 150 }
        );
        // Smaller than span * n: no effect
        let correlator = WindowedCorrelator::new(&pilot, true).with_min_margin(5);
        assert_eq!(correlator.search_window(500, 100).len(), 40);
    }

    #[test]
    fn test_locate_exact_offset() {
        let pilot = zadoff_chu(5, 31);
        let signal = embed(&pilot, 200, 500);

        for use_abs in [true, false] {
            // Coarse estimate off by a few samples either way
            for approx in [190isize, 200, 213] {
                let fine = WindowedCorrelator::new(&pilot, use_abs)
                    .locate(&signal, approx)
                    .unwrap();
                assert_eq!(fine.beginning, 200, "use_abs={} approx={}", use_abs, approx);
                assert_eq!(fine.end, 231);
                assert_eq!(fine.beginning, fine.best_lag + fine.window.start as isize);
            }
        }
    }

    #[test]
    fn test_locate_real_signal() {
        let pilot = zadoff_chu(5, 31);
        let mut signal = vec![0.0f32; 400];
        for (s, p) in signal[120..151].iter_mut().zip(pilot.iter()) {
            *s = p.re;
        }

        let fine = WindowedCorrelator::new(&pilot, false)
            .locate(&signal, 118)
            .unwrap();
        assert_eq!(fine.beginning, 120);
    }

    #[test]
    fn test_locate_empty_window() {
        let pilot = zadoff_chu(1, 10);
        let signal = vec![Complex32::new(1.0, 0.0); 50];
        let err = WindowedCorrelator::new(&pilot, true)
            .locate(&signal, -40)
            .unwrap_err();
        assert!(matches!(err, SyncError::EmptySearchWindow { approx: -40, .. }));
    }

    #[test]
    fn test_peak_to_mean_separates_pilot_from_silence() {
        let pilot = zadoff_chu(5, 31);
        let signal = embed(&pilot, 100, 300);
        let fine = WindowedCorrelator::new(&pilot, true)
            .locate(&signal, 100)
            .unwrap();
        assert!(fine.peak_to_mean > 3.0, "got {}", fine.peak_to_mean);

        let silent = vec![Complex32::new(0.0, 0.0); 300];
        let fine = WindowedCorrelator::new(&pilot, true)
            .locate(&silent, 100)
            .unwrap();
        assert_eq!(fine.peak_to_mean, 0.0);
    }
}
