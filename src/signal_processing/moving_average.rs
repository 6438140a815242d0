/// Centered moving average (uniform filter) over a whole buffer
///
/// `output[i]` is the mean of `values[j]` for `j` in `[i - w/2, i - w/2 + w)`,
/// so even windows extend one sample further to the left than to the right.
/// Indices outside the buffer are mirrored about the edge samples
/// (`d c b a | a b c d | d c b a`), repeating as often as needed when the
/// window is longer than the buffer.
///
/// The filter keeps a running sum in `f64`, making it O(N) regardless of
/// the window length.
///
/// # Arguments
/// * `values` - Samples to smooth
/// * `window` - Averaging window length (0 is treated as 1)
pub fn uniform_filter(values: &[f32], window: usize) -> Vec<f32> {
    let len = values.len();
    if len == 0 {
        return Vec::new();
    }

    let window = window.max(1);
    let half = (window / 2) as isize;
    let at = |i: isize| values[reflect_index(i, len)] as f64;

    let mut sum: f64 = (-half..window as isize - half).map(at).sum();
    let mut output = Vec::with_capacity(len);

    for i in 0..len as isize {
        output.push((sum / window as f64) as f32);
        // Slide [i - half, i - half + w) one sample to the right
        sum += at(i - half + window as isize) - at(i - half);
    }

    output
}

/// Map an arbitrary index onto `[0, len)` by half-sample symmetric reflection
pub fn reflect_index(i: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = i.rem_euclid(period) as usize;
    if m < len { m } else { 2 * len - 1 - m }
}
