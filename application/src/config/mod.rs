//! Application-level configuration.
//!
//! These types control how use cases behave; they are built by the binary
//! from file configuration and command-line flags.

mod field_of_play_config;
mod surface_config;

pub use field_of_play_config::{DEFAULT_DECISION_REVEAL, FieldOfPlayConfig};
pub use surface_config::{DEFAULT_DOWN_DISPLAY, SurfaceConfig};
