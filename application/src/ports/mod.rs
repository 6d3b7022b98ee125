//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod audio;
pub mod authority;
pub mod clock;
pub mod display;
pub mod surface_event;
pub mod timer;
