//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod aggregate_decision;
pub mod field_of_play;
pub mod surface_runner;
