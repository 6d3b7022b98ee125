//! Configuration file loading for refbox
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./refbox.toml` or `./.refbox.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/refbox/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    AUDIBLE_RANGE_HZ, FileAudioConfig, FileConfig, FileLogConfig, FileSurfaceConfig,
    FileTimingConfig,
};
pub use loader::ConfigLoader;
