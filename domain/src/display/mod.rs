//! Display-side domain concepts: orientation, light colors, surface state.

pub mod orientation;
pub mod surface;

pub use orientation::{DisplayOrientation, LightColor, map_votes_to_display_positions};
pub use surface::{Surface, SurfaceId};
