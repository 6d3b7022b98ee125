//! Delayed-hide timer port
//!
//! After the down signal is shown, the arrow is replaced by the decision
//! lights once a fixed delay has elapsed. The delay is modelled as an
//! explicit task that is owned by the round and cancelled on reset.
//!
//! ```text
//! DecisionAggregator ──schedule_hide(delay, ticket)──▶ HideTimer
//!        ▲                                                │
//!        └────────── SurfaceCommand::HideDown{ticket} ◀───┘  (unless cancelled)
//! ```
//!
//! The ticket names one scheduling: a fire is honoured only if its ticket is
//! still the surface's pending one.

use refbox_domain::RoundEpoch;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Identifies one scheduled hide: the round plus a per-surface sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideTicket {
    pub epoch: RoundEpoch,
    pub seq: u64,
}

impl HideTicket {
    pub fn new(epoch: RoundEpoch, seq: u64) -> Self {
        Self { epoch, seq }
    }
}

/// Handle on a pending hide. Dropping it does not cancel; call [`cancel`](Self::cancel).
#[derive(Debug, Clone)]
pub struct ScheduledHide {
    ticket: HideTicket,
    token: CancellationToken,
}

impl ScheduledHide {
    pub fn new(ticket: HideTicket, token: CancellationToken) -> Self {
        Self { ticket, token }
    }

    pub fn ticket(&self) -> HideTicket {
        self.ticket
    }

    /// Round this hide was scheduled for.
    pub fn epoch(&self) -> RoundEpoch {
        self.ticket.epoch
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Schedules a single delayed `HideDown` back into the owning surface
pub trait HideTimer: Send + Sync {
    fn schedule_hide(&self, delay: Duration, ticket: HideTicket) -> ScheduledHide;
}

/// Timer that never fires
pub struct NoTimer;

impl HideTimer for NoTimer {
    fn schedule_hide(&self, _delay: Duration, ticket: HideTicket) -> ScheduledHide {
        ScheduledHide::new(ticket, CancellationToken::new())
    }
}
