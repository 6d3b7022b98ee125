//! What a decision display currently shows, and which display it is

use super::orientation::LightColor;
use crate::decision::REFEREE_COUNT;
use serde::{Deserialize, Serialize};

/// Visible state of one decision display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", content = "lights", rename_all = "snake_case")]
pub enum Surface {
    /// Neither arrow nor lights
    #[default]
    Hidden,
    /// Down arrow (majority reached)
    DownArrow,
    /// Decision lights, already in display-position order
    Lights([LightColor; REFEREE_COUNT]),
}

impl Surface {
    /// Lights with every position neutral.
    pub fn neutral_lights() -> Self {
        Surface::Lights([LightColor::Neutral; REFEREE_COUNT])
    }

    pub fn lights(&self) -> Option<&[LightColor; REFEREE_COUNT]> {
        match self {
            Surface::Lights(colors) => Some(colors),
            _ => None,
        }
    }

    pub fn is_down_arrow(&self) -> bool {
        matches!(self, Surface::DownArrow)
    }
}

/// Identifies one display instance (attempt board, athlete board, jury console).
///
/// The scoring authority uses it to avoid echoing an event back to the
/// display that originated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u16);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}
