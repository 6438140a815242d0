//! Configuration for the Zadoff-Chu synchroniser.
//!
//! All sections implement `Default` and can be loaded from TOML; missing keys
//! keep their defaults:
//!
//! ```toml
//! [envelope]
//! window = "pilot-length"     # or "signal-fraction"
//!
//! [correlation]
//! search_span = 2
//!
//! [ambiguity]
//! min_peak_to_mean = 1.5
//! reject = false
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{DEFAULT_MIN_PEAK_TO_MEAN, DEFAULT_RATIO_APPROX, DEFAULT_SEARCH_SPAN};
use crate::error::{Result, SyncError};

/// Ratio between the pilot's native rate and the capture's sample rate
///
/// # Parsing formats
/// - `1.7` - decimal factor
/// - `17/10` - rational factor
///
/// # Example
/// ```
/// use zcsync::config::ResampleFactor;
///
/// let factor: ResampleFactor = "17/10".parse().unwrap();
/// assert_eq!(factor.as_f64(), 1.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleFactor(f64);

impl ResampleFactor {
    pub fn new(factor: f64) -> Self {
        Self(factor)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Default for ResampleFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for ResampleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResampleFactor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        let factor = if let Some((num, den)) = s.split_once('/') {
            let num: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid numerator: {}", s))?;
            let den: f64 = den
                .trim()
                .parse()
                .map_err(|_| format!("invalid denominator: {}", s))?;
            if den == 0.0 {
                return Err("denominator must be non-zero".to_string());
            }
            num / den
        } else {
            s.parse()
                .map_err(|_| format!("invalid resample factor: {}", s))?
        };

        if !factor.is_finite() || factor <= 0.0 {
            return Err("resample factor must be positive".to_string());
        }
        Ok(Self(factor))
    }
}

/// How the averaging window of the envelope estimator is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EnvelopeWindow {
    /// `round(zc_length * resample)`: one upsampled pilot length
    #[default]
    PilotLength,
    /// `round(signal_len / ratio_approx)`: a fixed fraction of the capture
    SignalFraction,
}

/// Coarse (envelope) stage configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Window sizing rule
    pub window: EnvelopeWindow,
}

/// Fine (correlation) stage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Half-width of the search window in pilot lengths
    pub search_span: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            search_span: DEFAULT_SEARCH_SPAN,
        }
    }
}

/// Detection confidence configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmbiguityConfig {
    /// Minimum peak-to-mean ratio of the correlation output
    pub min_peak_to_mean: f32,
    /// Fail with `SyncError::AmbiguousResult` instead of returning a flagged result
    pub reject: bool,
}

impl Default for AmbiguityConfig {
    fn default() -> Self {
        Self {
            min_peak_to_mean: DEFAULT_MIN_PEAK_TO_MEAN,
            reject: false,
        }
    }
}

/// Synchroniser configuration
///
/// # Example
/// ```
/// use zcsync::config::{EnvelopeWindow, SyncConfig};
///
/// let config = SyncConfig::from_toml_str("[envelope]\nwindow = \"signal-fraction\"").unwrap();
/// assert_eq!(config.envelope.window, EnvelopeWindow::SignalFraction);
/// assert_eq!(config.correlation.search_span, 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub envelope: EnvelopeConfig,
    pub correlation: CorrelationConfig,
    pub ambiguity: AmbiguityConfig,
}

impl SyncConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SyncError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.correlation.search_span == 0 {
            return Err(SyncError::Config(
                "correlation.search_span must be at least 1".to_string(),
            ));
        }
        if !self.ambiguity.min_peak_to_mean.is_finite() || self.ambiguity.min_peak_to_mean < 0.0 {
            return Err(SyncError::Config(
                "ambiguity.min_peak_to_mean must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pilot and search parameters of a single synchronisation
///
/// Mirrors the acquisition call `synchronise(signal, zc_root, zc_length,
/// resample=1, use_abs=True, ratio_approx=50)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncParams {
    /// Zadoff-Chu root index
    pub zc_root: u32,
    /// Zadoff-Chu length before resampling
    pub zc_length: usize,
    /// Pilot-to-capture rate ratio
    pub resample: f64,
    /// Correlate magnitudes instead of raw samples
    pub use_abs: bool,
    /// Capture length divisor for `EnvelopeWindow::SignalFraction`
    pub ratio_approx: usize,
}

impl SyncParams {
    pub fn new(zc_root: u32, zc_length: usize) -> Self {
        Self {
            zc_root,
            zc_length,
            resample: 1.0,
            use_abs: true,
            ratio_approx: DEFAULT_RATIO_APPROX,
        }
    }

    pub fn with_resample(mut self, resample: f64) -> Self {
        self.resample = resample;
        self
    }

    pub fn with_use_abs(mut self, use_abs: bool) -> Self {
        self.use_abs = use_abs;
        self
    }

    pub fn with_ratio_approx(mut self, ratio_approx: usize) -> Self {
        self.ratio_approx = ratio_approx;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_factor_decimal() {
        let factor: ResampleFactor = "1.7".parse().unwrap();
        assert_eq!(factor.as_f64(), 1.7);
    }

    #[test]
    fn test_resample_factor_ratio() {
        let factor: ResampleFactor = " 1 / 2 ".parse().unwrap();
        assert_eq!(factor.as_f64(), 0.5);

        let factor: ResampleFactor = "17/10".parse().unwrap();
        assert_eq!(factor.as_f64(), 1.7);
    }

    #[test]
    fn test_resample_factor_invalid() {
        assert!("abc".parse::<ResampleFactor>().is_err());
        assert!("0".parse::<ResampleFactor>().is_err());
        assert!("-2".parse::<ResampleFactor>().is_err());
        assert!("3/0".parse::<ResampleFactor>().is_err());
        assert!("inf".parse::<ResampleFactor>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.envelope.window, EnvelopeWindow::PilotLength);
        assert_eq!(config.correlation.search_span, DEFAULT_SEARCH_SPAN);
        assert!(!config.ambiguity.reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let config = SyncConfig::from_toml_str(
            r#"
            [correlation]
            search_span = 3

            [ambiguity]
            min_peak_to_mean = 2.0
            reject = true
            "#,
        )
        .unwrap();
        assert_eq!(config.envelope.window, EnvelopeWindow::PilotLength);
        assert_eq!(config.correlation.search_span, 3);
        assert!((config.ambiguity.min_peak_to_mean - 2.0).abs() < 1e-6);
        assert!(config.ambiguity.reject);
    }

    #[test]
    fn test_config_rejects_zero_span() {
        let err = SyncConfig::from_toml_str("[correlation]\nsearch_span = 0").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_config_rejects_unknown_window() {
        assert!(SyncConfig::from_toml_str("[envelope]\nwindow = \"sliding\"").is_err());
    }

    #[test]
    fn test_sync_params_defaults() {
        let params = SyncParams::new(5, 63);
        assert_eq!(params.resample, 1.0);
        assert!(params.use_abs);
        assert_eq!(params.ratio_approx, DEFAULT_RATIO_APPROX);

        let params = params.with_resample(2.0).with_use_abs(false).with_ratio_approx(10);
        assert_eq!(params.resample, 2.0);
        assert!(!params.use_abs);
        assert_eq!(params.ratio_approx, 10);
    }
}
