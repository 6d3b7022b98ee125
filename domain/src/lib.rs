//! Domain layer for refbox
//!
//! This crate contains the referee-decision model: votes, decision rounds,
//! the majority evaluation, reveal phases and display mapping.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Vote**: one per referee slot, white, red or unset, with a timestamp
//! - **Majority**: two of three votes agreeing; gives the "down" signal
//! - **Final decision**: all three votes cast; the majority of the three
//! - **Orientation**: public-facing boards show referee 1 on the left,
//!   athlete-facing boards mirror that

pub mod config;
pub mod core;
pub mod decision;
pub mod display;
pub mod keypad;
pub mod role;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use crate::core::error::{DecisionError, RejectReason};
pub use decision::{
    Ballot, Decision, DecisionRound, Evaluation, REFEREE_COUNT, RefereeSlot, RevealPhase,
    RoundEpoch, Tally, Timestamp, Vote, VoteReport, evaluate,
};
pub use display::{
    DisplayOrientation, LightColor, Surface, SurfaceId, map_votes_to_display_positions,
};
pub use role::{Role, RoleBehavior};
