//! Numeric constants for the synchronisation search
//!
//! Defaults mirror the values used by the acquisition pipeline; thresholds
//! guard divisions against silent captures.

/// Default divisor applied to the capture length when the envelope window is
/// derived from the signal instead of the pilot.
pub const DEFAULT_RATIO_APPROX: usize = 50;

/// Half-width of the correlation search window, in pilot lengths.
/// The window spans `[approx - span * n, approx + span * n)`.
pub const DEFAULT_SEARCH_SPAN: usize = 2;

/// Peak-to-mean ratio of the correlation output below which a detection is
/// reported as ambiguous.
/// Pure noise correlated by magnitude sits around 1.2; a pilot at 10 dB SNR
/// lands above 2.
pub const DEFAULT_MIN_PEAK_TO_MEAN: f32 = 1.5;

/// Minimum mean correlation score considered non-silent.
/// Scores below this make the peak-to-mean ratio meaningless and it is reported as zero.
pub const MIN_SCORE_THRESHOLD: f32 = 1e-12;
