//! Infrastructure layer for refbox
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod audio;
pub mod authority;
pub mod clock;
pub mod config;
pub mod logging;
pub mod timer;

// Re-export commonly used types
pub use audio::{BellTone, TerminalBell};
pub use authority::ChannelAuthority;
pub use clock::SystemClock;
pub use config::{
    ConfigLoader, FileAudioConfig, FileConfig, FileLogConfig, FileSurfaceConfig, FileTimingConfig,
};
pub use logging::JsonlVoteLog;
pub use timer::TokioHideTimer;
