//! Outward vote report
//!
//! The full vote vector is sent to the scoring authority on every change,
//! not only once a decision exists, so that peer displays stay informed.

use super::round::Tally;
use super::vote::{Ballot, Decision, REFEREE_COUNT, Timestamp, Vote};
use serde::{Deserialize, Serialize};

/// Snapshot of all three votes and their timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteReport {
    pub votes: [Vote; REFEREE_COUNT],
    pub times: [Timestamp; REFEREE_COUNT],
}

impl VoteReport {
    pub fn new(votes: [Vote; REFEREE_COUNT], times: [Timestamp; REFEREE_COUNT]) -> Self {
        Self { votes, times }
    }

    pub fn from_ballots(ballots: &[Ballot; REFEREE_COUNT]) -> Self {
        Self {
            votes: ballots.map(|b| b.vote),
            times: ballots.map(|b| b.at),
        }
    }

    pub fn tally(&self) -> Tally {
        Tally::of(&self.votes)
    }

    pub fn majority(&self) -> Decision {
        self.tally().majority()
    }

    pub fn final_value(&self) -> Decision {
        self.tally().final_decision()
    }

    pub fn is_complete(&self) -> bool {
        self.tally().is_complete()
    }

    /// Compact summary, e.g. `[W R -]`
    pub fn summary(&self) -> String {
        let marks: Vec<&str> = self
            .votes
            .iter()
            .map(|v| match v {
                Vote::White => "W",
                Vote::Red => "R",
                Vote::Unset => "-",
            })
            .collect();
        format!("[{}]", marks.join(" "))
    }
}
