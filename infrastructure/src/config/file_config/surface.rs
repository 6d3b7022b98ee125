//! Surface configuration from TOML (`[surface]` section)

use serde::{Deserialize, Serialize};

/// Raw surface configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSurfaceConfig {
    /// Lights in audience order (`false` mirrors them for the athlete)
    pub public_facing: bool,
    /// Jury console: no keypad input, no auto-hide
    pub jury: bool,
    /// Accept keypad votes from start-up
    pub enabled: bool,
}

impl Default for FileSurfaceConfig {
    fn default() -> Self {
        Self {
            public_facing: true,
            jury: false,
            enabled: true,
        }
    }
}
