#![allow(dead_code)]
#![allow(unused_imports)]

pub use zcsync::simulation::{
    NoiseConfig, PilotPlacement, apply_noise, generate_capture, real_part,
};

/// Clean complex capture with a pilot at `offset`
pub fn capture_with_pilot(
    root: u32,
    length: usize,
    resample: f64,
    offset: usize,
    capture_len: usize,
) -> Vec<num_complex::Complex32> {
    generate_capture(
        &PilotPlacement::new(root, length, offset, capture_len).with_resample(resample),
    )
}

/// Capture with a pilot at `offset` plus seeded complex AWGN
pub fn noisy_capture_with_pilot(
    root: u32,
    length: usize,
    offset: usize,
    capture_len: usize,
    snr_db: f32,
    seed: u64,
) -> Vec<num_complex::Complex32> {
    let placement = PilotPlacement::new(root, length, offset, capture_len);
    let noise = NoiseConfig::default().with_seed(seed).with_awgn(snr_db);
    apply_noise(&generate_capture(&placement), &noise, placement.pilot_power())
}
