//! Per-surface configuration.

use refbox_domain::{DisplayOrientation, Role, SurfaceId};
use std::time::Duration;

/// How long the down arrow stays up before the lights take over.
pub const DEFAULT_DOWN_DISPLAY: Duration = Duration::from_millis(2000);

/// Options recognised by a decision surface.
///
/// `public_facing`, `jury`, `audio_enabled` and `enabled` are the four
/// options the scoring authority sets on a display; `down_display` is the
/// auto-hide delay.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    pub id: SurfaceId,
    pub public_facing: bool,
    pub jury: bool,
    pub audio_enabled: bool,
    /// Armed for direct vote input
    pub enabled: bool,
    pub down_display: Duration,
}

impl SurfaceConfig {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            public_facing: true,
            jury: false,
            audio_enabled: true,
            enabled: false,
            down_display: DEFAULT_DOWN_DISPLAY,
        }
    }

    pub fn athlete_facing(mut self) -> Self {
        self.public_facing = false;
        self
    }

    pub fn jury(mut self) -> Self {
        self.jury = true;
        self
    }

    pub fn without_audio(mut self) -> Self {
        self.audio_enabled = false;
        self
    }

    pub fn armed(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_down_display(mut self, delay: Duration) -> Self {
        self.down_display = delay;
        self
    }

    pub fn orientation(&self) -> DisplayOrientation {
        DisplayOrientation::from_public_facing(self.public_facing)
    }

    pub fn role(&self) -> Role {
        Role::from_jury_flag(self.jury)
    }
}
