//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DecisionError`] — domain-level errors

pub mod error;
