//! Synthetic captures for testing and benchmarking the synchroniser

mod measure;
mod noise;
mod signal;

pub use measure::{TrialConfig, TrialStats, detection_error, run_trials};
pub use noise::{
    AdditiveNoiseConfig, CarrierOffsetConfig, ImpulseNoiseConfig, MultipathComponent,
    MultipathConfig, NoiseConfig, apply_noise, signal_power,
};
pub use signal::{PilotPlacement, generate_capture, real_part};
