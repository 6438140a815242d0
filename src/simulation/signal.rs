use num_complex::Complex32;

use crate::pilot::zadoff_chu;
use crate::signal_processing::upsample_hold;

/// Where and how a synthetic pilot is placed in a capture
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PilotPlacement {
    pub zc_root: u32,
    pub zc_length: usize,
    pub resample: f64,
    /// Index of the pilot's first sample
    pub offset: usize,
    pub capture_len: usize,
    pub amplitude: f32,
}

impl PilotPlacement {
    pub fn new(zc_root: u32, zc_length: usize, offset: usize, capture_len: usize) -> Self {
        Self {
            zc_root,
            zc_length,
            resample: 1.0,
            offset,
            capture_len,
            amplitude: 1.0,
        }
    }

    pub fn with_resample(mut self, resample: f64) -> Self {
        self.resample = resample;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Per-sample power of the placed pilot
    pub fn pilot_power(&self) -> f32 {
        self.amplitude * self.amplitude
    }

    /// Pilot as it appears in the capture, scaled by `amplitude`
    pub fn resampled_pilot(&self) -> Vec<Complex32> {
        upsample_hold(&zadoff_chu(self.zc_root, self.zc_length), self.resample)
            .into_iter()
            .map(|s| s * self.amplitude)
            .collect()
    }
}

/// Noise-free capture: zeros everywhere except the placed pilot
///
/// A pilot running past `capture_len` is truncated.
pub fn generate_capture(placement: &PilotPlacement) -> Vec<Complex32> {
    let mut capture = vec![Complex32::new(0.0, 0.0); placement.capture_len];
    let pilot = placement.resampled_pilot();

    if placement.offset < capture.len() {
        let end = (placement.offset + pilot.len()).min(capture.len());
        let count = end - placement.offset;
        capture[placement.offset..end].copy_from_slice(&pilot[..count]);
    }

    capture
}

/// Real-valued version of a capture (the in-phase component)
pub fn real_part(capture: &[Complex32]) -> Vec<f32> {
    capture.iter().map(|s| s.re).collect()
}
