//! Application layer for refbox
//!
//! This crate contains the decision aggregator, its event loop, port
//! definitions, and application configuration. It depends only on the
//! domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{FieldOfPlayConfig, SurfaceConfig};
pub use ports::{
    audio::{AudioCue, CueTone, NoAudio},
    authority::{AuthorityNotifier, CompositeAuthority, NoAuthority, ReportEnvelope},
    clock::{Clock, FixedClock},
    display::{DisplayAdapter, NoDisplay},
    surface_event::{NoSurfaceEvents, SurfaceEvent, SurfaceEventSink, SurfaceNotice},
    timer::{HideTicket, HideTimer, NoTimer, ScheduledHide},
};
pub use use_cases::aggregate_decision::{DecisionAggregator, SurfacePorts};
pub use use_cases::field_of_play::FieldOfPlay;
pub use use_cases::surface_runner::{
    Broadcast, SurfaceCommand, SurfaceDirectory, SurfaceHandle, SurfaceRunner, dispatch,
};
