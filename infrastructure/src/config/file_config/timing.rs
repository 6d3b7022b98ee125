//! Timing configuration from TOML (`[timing]` section)

use refbox_application::config::{DEFAULT_DECISION_REVEAL, DEFAULT_DOWN_DISPLAY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw timing configuration from TOML, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimingConfig {
    /// How long the down arrow stays before the lights replace it
    pub down_display_ms: u64,
    /// Delay between the third vote and the lights on the other boards
    pub decision_reveal_ms: u64,
}

impl FileTimingConfig {
    pub fn down_display(&self) -> Duration {
        Duration::from_millis(self.down_display_ms)
    }

    pub fn decision_reveal(&self) -> Duration {
        Duration::from_millis(self.decision_reveal_ms)
    }
}

impl Default for FileTimingConfig {
    fn default() -> Self {
        Self {
            down_display_ms: DEFAULT_DOWN_DISPLAY.as_millis() as u64,
            decision_reveal_ms: DEFAULT_DECISION_REVEAL.as_millis() as u64,
        }
    }
}
