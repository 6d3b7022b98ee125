//! Vote primitives for referee decisions
//!
//! A decision is made by exactly three referees. Each referee owns one
//! [`RefereeSlot`] and casts a [`Vote`] that is either white (good lift)
//! or red (no lift).

use crate::core::error::DecisionError;
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch. `0` means "not yet cast".
pub type Timestamp = u64;

/// Number of referees on a decision panel.
pub const REFEREE_COUNT: usize = 3;

/// A single referee's vote value
///
/// # Example
///
/// ```
/// use refbox_domain::Vote;
///
/// assert!(Vote::White.is_cast());
/// assert!(!Vote::Unset.is_cast());
/// assert_eq!(Vote::from_good_lift(Some(false)), Vote::Red);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    /// Good lift
    White,
    /// No lift
    Red,
    /// Referee has not voted yet this round
    #[default]
    Unset,
}

impl Vote {
    /// Whether the referee has actually voted.
    pub fn is_cast(&self) -> bool {
        !matches!(self, Vote::Unset)
    }

    /// Tri-state boolean used on the wire by the scoring server
    /// (`true` = white, `false` = red, `None` = not cast).
    pub fn as_good_lift(&self) -> Option<bool> {
        match self {
            Vote::White => Some(true),
            Vote::Red => Some(false),
            Vote::Unset => None,
        }
    }

    /// Inverse of [`Vote::as_good_lift`].
    pub fn from_good_lift(value: Option<bool>) -> Self {
        match value {
            Some(true) => Vote::White,
            Some(false) => Vote::Red,
            None => Vote::Unset,
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vote::White => write!(f, "white"),
            Vote::Red => write!(f, "red"),
            Vote::Unset => write!(f, "-"),
        }
    }
}

/// Aggregated outcome of a round (majority or final)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    White,
    Red,
    /// Not enough agreeing votes yet
    #[default]
    Unknown,
}

impl Decision {
    pub fn is_known(&self) -> bool {
        !matches!(self, Decision::Unknown)
    }

    /// Whether the lift was judged good. `None` while unknown.
    pub fn is_good_lift(&self) -> Option<bool> {
        match self {
            Decision::White => Some(true),
            Decision::Red => Some(false),
            Decision::Unknown => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::White => write!(f, "Good lift"),
            Decision::Red => write!(f, "No lift"),
            Decision::Unknown => write!(f, "Pending"),
        }
    }
}

/// Referee position on the panel (1, 2 or 3)
///
/// Construction is validated, so an existing `RefereeSlot` always indexes
/// a real vote slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RefereeSlot(u8);

impl RefereeSlot {
    pub const ONE: RefereeSlot = RefereeSlot(1);
    pub const TWO: RefereeSlot = RefereeSlot(2);
    pub const THREE: RefereeSlot = RefereeSlot(3);

    /// All slots in panel order.
    pub const ALL: [RefereeSlot; REFEREE_COUNT] = [Self::ONE, Self::TWO, Self::THREE];

    /// Create a slot from its 1-based number.
    pub fn new(number: u8) -> Result<Self, DecisionError> {
        match number {
            1..=3 => Ok(Self(number)),
            other => Err(DecisionError::InvalidSlot(other)),
        }
    }

    /// 1-based referee number.
    pub fn number(&self) -> u8 {
        self.0
    }

    /// 0-based index into a vote array.
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for RefereeSlot {
    type Error = DecisionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RefereeSlot> for u8 {
    fn from(slot: RefereeSlot) -> Self {
        slot.0
    }
}

impl std::fmt::Display for RefereeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ref{}", self.0)
    }
}

/// A vote together with the time it was cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ballot {
    pub vote: Vote,
    /// When the vote was cast (`0` while unset)
    pub at: Timestamp,
}

impl Ballot {
    pub fn new(vote: Vote, at: Timestamp) -> Self {
        Self { vote, at }
    }
}
