/// Output length of a sequence of `len` samples stretched by `factor`
///
/// Rounds half away from zero. The synchroniser derives both the envelope
/// window and the upsampled pilot length from this, so the two always agree.
pub fn resampled_len(len: usize, factor: f64) -> usize {
    let scaled = (len as f64 * factor).round();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as usize
    } else {
        0
    }
}

/// Zero-order hold resampling
///
/// Output sample `i` repeats input sample `floor(i / factor)` (clamped to the
/// last sample), giving [`resampled_len`] samples. Works for factors below 1
/// too, where it decimates by picking the held sample.
///
/// # Arguments
/// * `sequence` - Samples at the native rate
/// * `factor` - Output rate divided by input rate (must be positive)
pub fn upsample_hold<T: Copy>(sequence: &[T], factor: f64) -> Vec<T> {
    if sequence.is_empty() || factor.is_nan() || factor <= 0.0 {
        return Vec::new();
    }

    let last = sequence.len() - 1;
    (0..resampled_len(sequence.len(), factor))
        .map(|i| {
            let src = (i as f64 / factor).floor() as usize;
            sequence[src.min(last)]
        })
        .collect()
}
