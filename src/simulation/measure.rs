use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rolling_stats::Stats;

use crate::config::SyncParams;
use crate::error::SyncError;
use crate::sync::{SyncResult, Synchroniser};

use super::{NoiseConfig, PilotPlacement, apply_noise, generate_capture};

/// Monte-Carlo synchronisation experiment
#[derive(Debug, Clone)]
pub struct TrialConfig {
    pub zc_root: u32,
    pub zc_length: usize,
    pub resample: f64,
    pub use_abs: bool,
    pub capture_len: usize,
    pub amplitude: f32,
    pub trials: usize,
    /// Seeds both offset selection and per-trial noise
    pub seed: u64,
}

impl TrialConfig {
    pub fn new(zc_root: u32, zc_length: usize, capture_len: usize, trials: usize) -> Self {
        Self {
            zc_root,
            zc_length,
            resample: 1.0,
            use_abs: true,
            capture_len,
            amplitude: 1.0,
            trials,
            seed: 0,
        }
    }

    pub fn params(&self) -> SyncParams {
        SyncParams::new(self.zc_root, self.zc_length)
            .with_resample(self.resample)
            .with_use_abs(self.use_abs)
    }

    fn placement(&self, offset: usize) -> PilotPlacement {
        PilotPlacement::new(self.zc_root, self.zc_length, offset, self.capture_len)
            .with_resample(self.resample)
            .with_amplitude(self.amplitude)
    }
}

/// Signed detection error in samples
pub fn detection_error(result: &SyncResult, true_offset: usize) -> isize {
    result.beginning - true_offset as isize
}

#[derive(Debug, Clone, Default)]
pub struct TrialStats {
    pub trials: usize,
    pub exact: usize,
    pub within_one: usize,
    /// Trials whose synchronisation returned an error
    pub failed: usize,
    pub ambiguous: usize,
    pub max_abs_error: usize,
    pub mean_abs_error: f32,
    pub std_dev_abs_error: f32,
}

impl TrialStats {
    pub fn within_one_rate(&self) -> f32 {
        if self.trials == 0 {
            return 0.0;
        }
        self.within_one as f32 / self.trials as f32
    }

    pub fn exact_rate(&self) -> f32 {
        if self.trials == 0 {
            return 0.0;
        }
        self.exact as f32 / self.trials as f32
    }
}

/// Synchronise `config.trials` noisy captures with random pilot offsets
///
/// Offsets are drawn uniformly from the positions where the whole pilot fits.
/// Trial `i` uses noise seed `config.seed + i + 1`, overriding any seed in
/// `noise`.
pub fn run_trials(
    synchroniser: &Synchroniser,
    config: &TrialConfig,
    noise: &NoiseConfig,
) -> TrialStats {
    let params = config.params();
    let pilot_len = config.placement(0).resampled_pilot().len();
    let free_span = config.capture_len.saturating_sub(pilot_len) + 1;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut error_stats: Stats<f32> = Stats::new();
    let mut stats = TrialStats {
        trials: config.trials,
        ..TrialStats::default()
    };

    for trial in 0..config.trials {
        let offset = ((rng.random::<f64>() * free_span as f64) as usize).min(free_span - 1);
        let placement = config.placement(offset);

        let trial_noise = noise
            .clone()
            .with_seed(config.seed.wrapping_add(trial as u64 + 1));
        let capture = apply_noise(
            &generate_capture(&placement),
            &trial_noise,
            placement.pilot_power(),
        );

        match synchroniser.synchronise(&capture, &params) {
            Ok(result) => {
                if result.ambiguous {
                    stats.ambiguous += 1;
                }
                let error = detection_error(&result, offset).unsigned_abs();
                if error == 0 {
                    stats.exact += 1;
                }
                if error <= 1 {
                    stats.within_one += 1;
                }
                stats.max_abs_error = stats.max_abs_error.max(error);
                error_stats.update(error as f32);
            }
            Err(SyncError::AmbiguousResult { .. }) => {
                stats.ambiguous += 1;
                stats.failed += 1;
            }
            Err(e) => {
                log::debug!("Trial {} failed: {}", trial, e);
                stats.failed += 1;
            }
        }
    }

    if error_stats.count > 0 {
        stats.mean_abs_error = error_stats.mean;
        stats.std_dev_abs_error = error_stats.std_dev;
    }

    stats
}
