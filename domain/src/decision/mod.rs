//! Referee decision domain
//!
//! Three referees vote white or red. Two agreeing votes make a majority
//! (the "down" signal may be given); three cast votes make the final decision.
//!
//! - [`vote`] — vote values, referee slots, ballots
//! - [`round`] — per-attempt state and the pure majority evaluation
//! - [`reveal`] — down-signal phases
//! - [`report`] — vote vector sent to the scoring authority

pub mod report;
pub mod reveal;
pub mod round;
pub mod vote;

pub use report::VoteReport;
pub use reveal::RevealPhase;
pub use round::{DecisionRound, Evaluation, RoundEpoch, Tally, evaluate};
pub use vote::{Ballot, Decision, REFEREE_COUNT, RefereeSlot, Timestamp, Vote};
