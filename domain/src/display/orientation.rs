//! Orientation-aware mapping of referee votes onto light positions
//!
//! Referee 1 sits on the left when seen from the audience. The athlete looks
//! at the board from the platform, so for athlete-facing boards the order of
//! the lights is mirrored. Referee 2 is always in the middle.

use crate::decision::{REFEREE_COUNT, Vote};
use serde::{Deserialize, Serialize};

/// Which side of the platform a board faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOrientation {
    /// Audience side: referee 1 on the left
    #[default]
    PublicFacing,
    /// Athlete side: referee 1 on the right
    AthleteFacing,
}

impl DisplayOrientation {
    pub fn from_public_facing(public_facing: bool) -> Self {
        if public_facing {
            Self::PublicFacing
        } else {
            Self::AthleteFacing
        }
    }

    pub fn is_public_facing(&self) -> bool {
        matches!(self, Self::PublicFacing)
    }
}

/// Color of one decision light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LightColor {
    White,
    Red,
    #[default]
    Neutral,
}

impl From<Vote> for LightColor {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::White => LightColor::White,
            Vote::Red => LightColor::Red,
            Vote::Unset => LightColor::Neutral,
        }
    }
}

/// Colors for display positions 1..3 (left to right as seen by the viewer).
pub fn map_votes_to_display_positions(
    orientation: DisplayOrientation,
    v1: Vote,
    v2: Vote,
    v3: Vote,
) -> [LightColor; REFEREE_COUNT] {
    match orientation {
        DisplayOrientation::PublicFacing => [v1.into(), v2.into(), v3.into()],
        DisplayOrientation::AthleteFacing => [v3.into(), v2.into(), v1.into()],
    }
}
