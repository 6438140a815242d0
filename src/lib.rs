pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pilot;
pub mod signal_processing;
pub mod sync;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{SyncConfig, SyncParams};
pub use error::{Result, SyncError};
pub use sync::{SyncResult, Synchroniser, synchronise};
pub use wav::{Capture, load_capture, save_capture};
