pub mod correlation;
pub mod moving_average;
pub mod peak;
pub mod resample;
pub mod sample;

pub use correlation::{correlate_same, correlate_same_real, correlation_lags_same};
pub use moving_average::uniform_filter;
pub use peak::{argmax_first, peak_to_mean};
pub use resample::{resampled_len, upsample_hold};
pub use sample::{Sample, magnitudes};
