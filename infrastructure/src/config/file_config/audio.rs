//! Audio configuration from TOML (`[audio]` section)

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Frequencies accepted without a warning.
pub const AUDIBLE_RANGE_HZ: RangeInclusive<u32> = 20..=20_000;

/// Raw audio configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAudioConfig {
    /// Play the down-signal cue on the displays
    pub enabled: bool,
    /// The cue is played centrally; displays get a silent down signal
    pub emit_on_server: bool,
    pub frequency_hz: u32,
    pub duration_ms: u64,
}

impl FileAudioConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for FileAudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            emit_on_server: false,
            frequency_hz: 1000,
            duration_ms: 500,
        }
    }
}
