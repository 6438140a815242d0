//! Zadoff-Chu reference sequences
//!
//! For length `N` and root `u`:
//!
//! ```text
//! x[k] = exp(-j * pi * u * k * (k + cf) / N),   cf = N mod 2
//! ```
//!
//! Every sample has unit magnitude. The quadratic phase term is reduced
//! modulo `2N` in integer arithmetic before conversion to float, so long
//! sequences keep full phase accuracy.

use num_complex::Complex32;
use std::f64::consts::PI;

/// Generate the Zadoff-Chu sequence for `root` and `length`
///
/// Returns an empty sequence for `length == 0`. The root should be coprime
/// with `length` for the constant-amplitude zero-autocorrelation property,
/// but any root is accepted.
///
/// # Example
/// ```
/// use zcsync::pilot::zadoff_chu;
///
/// let seq = zadoff_chu(5, 63);
/// assert_eq!(seq.len(), 63);
/// assert!(seq.iter().all(|s| (s.norm() - 1.0).abs() < 1e-5));
/// ```
pub fn zadoff_chu(root: u32, length: usize) -> Vec<Complex32> {
    if length == 0 {
        return Vec::new();
    }

    let n = length as u128;
    let cf = n % 2;
    let modulus = 2 * n;

    (0..n)
        .map(|k| {
            let reduced = (root as u128 * k % modulus) * ((k + cf) % modulus) % modulus;
            let phase = -PI * reduced as f64 / n as f64;
            Complex32::new(phase.cos() as f32, phase.sin() as f32)
        })
        .collect()
}
