//! Outward surface events
//!
//! `down` and `hide` are consumed by whatever contains the decision display
//! (an attempt board hides the athlete info while the lights are shown, a
//! jury console starts its deliberation timer on `down`).

use refbox_domain::SurfaceId;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Down signal was given (once per round)
    Down,
    /// Parent should hide this display
    Hide,
}

/// Event with the surface it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceNotice {
    pub surface: SurfaceId,
    pub event: SurfaceEvent,
}

pub trait SurfaceEventSink: Send + Sync {
    fn emit(&self, surface: SurfaceId, event: SurfaceEvent);
}

/// Sink that drops events
pub struct NoSurfaceEvents;

impl SurfaceEventSink for NoSurfaceEvents {
    fn emit(&self, _surface: SurfaceId, _event: SurfaceEvent) {}
}

impl SurfaceEventSink for mpsc::UnboundedSender<SurfaceNotice> {
    fn emit(&self, surface: SurfaceId, event: SurfaceEvent) {
        // Receiver gone means the parent shut down; nothing left to notify.
        let _ = self.send(SurfaceNotice { surface, event });
    }
}
