//! "Same"-mode cross-correlation and its lag vector.
//!
//! For a signal `x` of length `L` and a reference `p` of length `n`, output
//! index `j` holds
//!
//! ```text
//! corr[j] = Σ_t x[t] · conj(p[t - lag_j]),   lag_j = j - n/2
//! ```
//!
//! with `p` taken as zero outside `[0, n)`. The output has the signal's
//! length and a lag of `k` means the reference starts `k` samples after the
//! signal's first sample. Evaluation is direct, O(L · n).

use num_complex::Complex32;

/// Lags matching [`correlate_same`] / [`correlate_same_real`] output indices
pub fn correlation_lags_same(signal_len: usize, reference_len: usize) -> Vec<isize> {
    let offset = (reference_len / 2) as isize;
    (0..signal_len as isize).map(|j| j - offset).collect()
}

/// Complex cross-correlation, conjugating the reference
pub fn correlate_same(signal: &[Complex32], reference: &[Complex32]) -> Vec<Complex32> {
    correlation_lags_same(signal.len(), reference.len())
        .into_iter()
        .map(|lag| {
            overlap(signal.len(), reference.len(), lag)
                .map(|(t, k)| signal[t] * reference[k].conj())
                .sum::<Complex32>()
        })
        .collect()
}

/// Real cross-correlation
pub fn correlate_same_real(signal: &[f32], reference: &[f32]) -> Vec<f32> {
    correlation_lags_same(signal.len(), reference.len())
        .into_iter()
        .map(|lag| {
            overlap(signal.len(), reference.len(), lag)
                .map(|(t, k)| signal[t] * reference[k])
                .sum::<f32>()
        })
        .collect()
}

/// `(signal index, reference index)` pairs that overlap at `lag`
fn overlap(
    signal_len: usize,
    reference_len: usize,
    lag: isize,
) -> impl Iterator<Item = (usize, usize)> {
    let k_start = (-lag).max(0) as usize;
    let k_end = (signal_len as isize - lag).clamp(0, reference_len as isize) as usize;
    (k_start..k_end.max(k_start)).map(move |k| ((k as isize + lag) as usize, k))
}
