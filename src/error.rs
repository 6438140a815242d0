use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(
        "Ambiguous synchronisation: peak-to-mean ratio {peak_to_mean:.2} is below {threshold:.2}"
    )]
    AmbiguousResult { peak_to_mean: f32, threshold: f32 },

    #[error("Search window around coarse estimate {approx} is empty ({signal_len} samples)")]
    EmptySearchWindow { approx: isize, signal_len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported capture: {0}")]
    UnsupportedCapture(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
