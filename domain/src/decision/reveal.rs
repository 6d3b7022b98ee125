//! Reveal protocol phases
//!
//! ```text
//! Collecting ──first majority / showDown──▶ Revealed
//!     │                                       │ hide timer / showDecisions
//!     │ showDecisions                         ▼
//!     └──────────────────────────────────▶ Displaying
//!
//! reset: any phase ──▶ Collecting (next round, surface hidden)
//! ```
//!
//! The down signal is given at most once per round; that is tracked by the
//! round's `revealed` flag, not by the phase. A jury console may already be
//! showing lights when the authority tells it to show the arrow.

use serde::{Deserialize, Serialize};

/// Where a round is in the down-signal reveal sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// Waiting for votes; nothing shown
    #[default]
    Collecting,
    /// Down arrow shown
    Revealed,
    /// Decision lights shown
    Displaying,
}

impl RevealPhase {
    /// Transition taken when the down signal is shown.
    pub fn reveal(self) -> Option<Self> {
        match self {
            RevealPhase::Revealed => None,
            RevealPhase::Collecting | RevealPhase::Displaying => Some(RevealPhase::Revealed),
        }
    }

    /// Transition taken when the down arrow is taken away (timer or explicit).
    pub fn hide_down(self) -> Option<Self> {
        match self {
            RevealPhase::Revealed => Some(RevealPhase::Displaying),
            _ => None,
        }
    }

    /// Final colors were pushed by the authority.
    pub fn show_decisions(self) -> Self {
        RevealPhase::Displaying
    }

    pub fn is_down_visible(&self) -> bool {
        matches!(self, RevealPhase::Revealed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RevealPhase::Collecting => "collecting",
            RevealPhase::Revealed => "revealed",
            RevealPhase::Displaying => "displaying",
        }
    }
}

impl std::fmt::Display for RevealPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_unless_already_showing_arrow() {
        assert_eq!(RevealPhase::Collecting.reveal(), Some(RevealPhase::Revealed));
        assert_eq!(RevealPhase::Displaying.reveal(), Some(RevealPhase::Revealed));
        assert_eq!(RevealPhase::Revealed.reveal(), None);
    }

    #[test]
    fn test_hide_down_only_from_revealed() {
        assert_eq!(
            RevealPhase::Revealed.hide_down(),
            Some(RevealPhase::Displaying)
        );
        assert_eq!(RevealPhase::Collecting.hide_down(), None);
        assert_eq!(RevealPhase::Displaying.hide_down(), None);
    }

    #[test]
    fn test_show_decisions_always_displays() {
        for phase in [
            RevealPhase::Collecting,
            RevealPhase::Revealed,
            RevealPhase::Displaying,
        ] {
            assert_eq!(phase.show_decisions(), RevealPhase::Displaying);
        }
    }
}
