//! Field-of-play (loopback authority) configuration.

use std::time::Duration;

/// Delay between the third vote and the lights on the public boards.
pub const DEFAULT_DECISION_REVEAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct FieldOfPlayConfig {
    /// Wait before pushing the final decision to non-jury boards
    pub decision_reveal: Duration,
    /// Sound is produced centrally, so displays receive the down signal silenced
    pub emit_sounds_on_server: bool,
}

impl Default for FieldOfPlayConfig {
    fn default() -> Self {
        Self {
            decision_reveal: DEFAULT_DECISION_REVEAL,
            emit_sounds_on_server: false,
        }
    }
}
