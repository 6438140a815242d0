use num_complex::Complex32;
use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f32::consts::PI;

/// Channel impairments applied to a synthetic capture
///
/// Stages run in a fixed order: multipath, carrier offset, impulses, then
/// additive noise. A fixed `seed` makes the result reproducible.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub carrier: Option<CarrierOffsetConfig>,
    pub multipath: Option<MultipathConfig>,
    pub impulse: Option<ImpulseNoiseConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f32) -> Self {
        self.additive = Some(AdditiveNoiseConfig { snr_db });
        self
    }

    pub fn with_carrier_offset(mut self, phase_radians: f32, cycles_per_sample: f32) -> Self {
        self.carrier = Some(CarrierOffsetConfig {
            phase_radians,
            cycles_per_sample,
        });
        self
    }

    pub fn with_multipath(mut self, components: Vec<MultipathComponent>) -> Self {
        self.multipath = Some(MultipathConfig { components });
        self
    }

    pub fn with_impulse(mut self, rate: f32, amplitude: f32, duration_samples: usize) -> Self {
        self.impulse = Some(ImpulseNoiseConfig {
            rate,
            amplitude,
            duration_samples,
        });
        self
    }
}

/// Complex white Gaussian noise
///
/// `snr_db` is the pilot's per-sample power over the noise's per-sample power.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f32,
}

/// Constant phase rotation plus a residual carrier frequency offset
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CarrierOffsetConfig {
    #[serde(default)]
    pub phase_radians: f32,
    #[serde(default)]
    pub cycles_per_sample: f32,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct MultipathComponent {
    pub delay_samples: usize,
    pub amplitude: f32,
    pub phase_offset: f32,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct MultipathConfig {
    pub components: Vec<MultipathComponent>,
}

/// Random bursts of constant-magnitude interference
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ImpulseNoiseConfig {
    /// Expected bursts per sample
    pub rate: f32,
    pub amplitude: f32,
    pub duration_samples: usize,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean `|x|^2` per sample
pub fn signal_power(signal: &[Complex32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|s| s.norm_sqr()).sum::<f32>() / signal.len() as f32
}

fn apply_additive_noise(
    signal: &mut [Complex32],
    config: &AdditiveNoiseConfig,
    reference_power: f32,
    rng: &mut ChaCha8Rng,
) {
    if reference_power <= 0.0 {
        return;
    }

    let snr_linear = 10.0_f32.powf(config.snr_db / 10.0);
    let noise_power = reference_power / snr_linear;
    // Split evenly between I and Q
    let component_std = (noise_power / 2.0).sqrt();

    let Ok(normal) = Normal::new(0.0, component_std as f64) else {
        return;
    };

    for sample in signal.iter_mut() {
        let re = normal.sample(rng) as f32;
        let im = normal.sample(rng) as f32;
        *sample += Complex32::new(re, im);
    }
}

fn apply_carrier_offset(signal: &mut [Complex32], config: &CarrierOffsetConfig) {
    for (i, sample) in signal.iter_mut().enumerate() {
        let phase = config.phase_radians + 2.0 * PI * config.cycles_per_sample * i as f32;
        *sample *= Complex32::from_polar(1.0, phase);
    }
}

fn apply_multipath(signal: &mut [Complex32], config: &MultipathConfig) {
    if config.components.is_empty() {
        return;
    }

    let original = signal.to_vec();
    for component in &config.components {
        let gain = Complex32::from_polar(component.amplitude, component.phase_offset);
        for (i, s) in signal.iter_mut().enumerate().skip(component.delay_samples) {
            *s += gain * original[i - component.delay_samples];
        }
    }
}

fn apply_impulse_noise(signal: &mut [Complex32], config: &ImpulseNoiseConfig, rng: &mut ChaCha8Rng) {
    let n = signal.len();
    if n == 0 || config.rate <= 0.0 {
        return;
    }

    let avg_samples_between_impulses = 1.0 / config.rate;

    let mut pos = 0usize;
    loop {
        let interval = (rng.random::<f32>() * 2.0 * avg_samples_between_impulses) as usize;
        pos += interval.max(1);

        if pos >= n {
            break;
        }

        let phase = rng.random::<f32>() * 2.0 * PI;
        let burst = Complex32::from_polar(config.amplitude, phase);
        let end = (pos + config.duration_samples).min(n);

        for sample in signal[pos..end].iter_mut() {
            *sample += burst;
        }
    }
}

/// Apply the configured impairments to a clean capture
///
/// # Arguments
/// * `clean_signal` - Noise-free capture
/// * `config` - Impairments to apply
/// * `reference_power` - Per-sample power the SNR is measured against
///   (the pilot's, typically `amplitude^2`)
pub fn apply_noise(
    clean_signal: &[Complex32],
    config: &NoiseConfig,
    reference_power: f32,
) -> Vec<Complex32> {
    let mut signal = clean_signal.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref multipath_config) = config.multipath {
        apply_multipath(&mut signal, multipath_config);
    }

    if let Some(ref carrier_config) = config.carrier {
        apply_carrier_offset(&mut signal, carrier_config);
    }

    if let Some(ref impulse_config) = config.impulse {
        apply_impulse_noise(&mut signal, impulse_config, &mut rng);
    }

    if let Some(ref additive_config) = config.additive {
        apply_additive_noise(&mut signal, additive_config, reference_power, &mut rng);
    }

    signal
}
