//! Decision rounds
//!
//! A [`DecisionRound`] is the transient record of one attempt: three ballots,
//! the reveal flag and the current [`RevealPhase`]. The round is the single
//! source of truth for evaluation; nothing outside it keeps a copy of the votes.

use super::reveal::RevealPhase;
use super::report::VoteReport;
use super::vote::{Ballot, Decision, REFEREE_COUNT, RefereeSlot, Timestamp, Vote};
use crate::core::error::DecisionError;
use serde::{Deserialize, Serialize};

/// Identifies one round. Incremented on every reset so that delayed work
/// scheduled for an earlier round can recognise itself as stale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct RoundEpoch(u64);

impl RoundEpoch {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RoundEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// White/red counts over the three slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub white: usize,
    pub red: usize,
}

impl Tally {
    pub fn of(votes: &[Vote; REFEREE_COUNT]) -> Self {
        votes.iter().fold(Self::default(), |mut tally, vote| {
            match vote {
                Vote::White => tally.white += 1,
                Vote::Red => tally.red += 1,
                Vote::Unset => {}
            }
            tally
        })
    }

    /// Number of referees who have voted.
    pub fn cast(&self) -> usize {
        self.white + self.red
    }

    pub fn is_complete(&self) -> bool {
        self.cast() == REFEREE_COUNT
    }

    /// Value agreed on by at least two referees.
    pub fn majority(&self) -> Decision {
        if self.white >= 2 {
            Decision::White
        } else if self.red >= 2 {
            Decision::Red
        } else {
            Decision::Unknown
        }
    }

    /// Authoritative decision, only once all three have voted.
    ///
    /// Three is odd, so a complete tally always has a strict winner.
    pub fn final_decision(&self) -> Decision {
        if !self.is_complete() {
            Decision::Unknown
        } else if self.white >= 2 {
            Decision::White
        } else {
            Decision::Red
        }
    }

    /// Exactly two referees agree on the same side.
    pub fn has_agreeing_pair(&self) -> bool {
        self.white == 2 || self.red == 2
    }
}

/// Result of evaluating the live votes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub tally: Tally,
    pub majority: Decision,
    pub final_value: Decision,
    /// A majority became reachable and the down signal has not been shown yet.
    pub first_majority: bool,
}

/// Pure majority evaluation over the three vote values.
///
/// Timestamps are informational and do not take part in the math.
pub fn evaluate(votes: &[Vote; REFEREE_COUNT], revealed: bool) -> Evaluation {
    let tally = Tally::of(votes);
    Evaluation {
        tally,
        majority: tally.majority(),
        final_value: tally.final_decision(),
        first_majority: !revealed && tally.has_agreeing_pair(),
    }
}

/// Per-attempt decision state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRound {
    epoch: RoundEpoch,
    ballots: [Ballot; REFEREE_COUNT],
    revealed: bool,
    phase: RevealPhase,
}

impl DecisionRound {
    pub fn new(epoch: RoundEpoch) -> Self {
        Self {
            epoch,
            ballots: [Ballot::default(); REFEREE_COUNT],
            revealed: false,
            phase: RevealPhase::Collecting,
        }
    }

    /// Start the next round, discarding every vote.
    pub fn next_round(&self) -> Self {
        Self::new(self.epoch.next())
    }

    pub fn epoch(&self) -> RoundEpoch {
        self.epoch
    }

    /// Record a vote, overwriting whatever the referee had before.
    pub fn cast(
        &mut self,
        slot: RefereeSlot,
        vote: Vote,
        at: Timestamp,
    ) -> Result<(), DecisionError> {
        if !vote.is_cast() {
            return Err(DecisionError::UnsetVote(slot.number()));
        }
        self.ballots[slot.index()] = Ballot::new(vote, at);
        Ok(())
    }

    pub fn ballot(&self, slot: RefereeSlot) -> Ballot {
        self.ballots[slot.index()]
    }

    pub fn ballots(&self) -> &[Ballot; REFEREE_COUNT] {
        &self.ballots
    }

    pub fn votes(&self) -> [Vote; REFEREE_COUNT] {
        self.ballots.map(|b| b.vote)
    }

    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.votes(), self.revealed)
    }

    pub fn tally(&self) -> Tally {
        Tally::of(&self.votes())
    }

    pub fn cast_count(&self) -> usize {
        self.tally().cast()
    }

    pub fn majority(&self) -> Decision {
        self.tally().majority()
    }

    pub fn final_value(&self) -> Decision {
        self.tally().final_decision()
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Set the reveal flag. Returns `true` only the first time in a round.
    pub fn mark_revealed(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: RevealPhase) {
        self.phase = phase;
    }

    /// Snapshot of the vote vector for outward reporting.
    pub fn report(&self) -> VoteReport {
        VoteReport::from_ballots(&self.ballots)
    }
}

impl Default for DecisionRound {
    fn default() -> Self {
        Self::new(RoundEpoch::default())
    }
}
