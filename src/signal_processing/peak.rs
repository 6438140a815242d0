use crate::constants::MIN_SCORE_THRESHOLD;

/// Index of the first maximum
///
/// Scans in ascending order and only moves on a strictly greater value, so
/// ties resolve to the earliest index. NaN values never win.
///
/// Returns `None` for an empty buffer or one holding only NaN.
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, best_value)) if v <= best_value => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Ratio between a peak score and the mean of all scores
///
/// Returns 0.0 when the mean is too small to be meaningful (silent input).
pub fn peak_to_mean(values: &[f32], peak: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
    if mean.abs() < MIN_SCORE_THRESHOLD as f64 {
        return 0.0;
    }
    (peak as f64 / mean) as f32
}
