//! Scoring authority port
//!
//! Every vote change is reported to the scoring authority with the full vote
//! vector, synchronously and before any reveal the vote may cause. The call is
//! fire-and-forget at this layer: delivery failures belong to the adapter.

use refbox_domain::{SurfaceId, VoteReport};

/// Receives vote reports from a decision surface
pub trait AuthorityNotifier: Send + Sync {
    fn report_votes(&self, origin: SurfaceId, report: &VoteReport);
}

/// Authority that discards reports
pub struct NoAuthority;

impl AuthorityNotifier for NoAuthority {
    fn report_votes(&self, _origin: SurfaceId, _report: &VoteReport) {}
}

/// Fans a report out to several authorities, in order.
///
/// Used to both forward reports to the field of play and append them to
/// the vote log.
pub struct CompositeAuthority {
    delegates: Vec<Box<dyn AuthorityNotifier>>,
}

impl CompositeAuthority {
    pub fn new(delegates: Vec<Box<dyn AuthorityNotifier>>) -> Self {
        Self { delegates }
    }
}

impl AuthorityNotifier for CompositeAuthority {
    fn report_votes(&self, origin: SurfaceId, report: &VoteReport) {
        for d in &self.delegates {
            d.report_votes(origin, report);
        }
    }
}

/// A vote report tagged with the surface that sent it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEnvelope {
    pub origin: SurfaceId,
    pub report: VoteReport,
}
