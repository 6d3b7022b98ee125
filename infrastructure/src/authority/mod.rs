//! Channel-backed scoring authority
//!
//! Forwards every vote report into an mpsc channel drained by the field of
//! play. Sending never blocks, so reporting stays synchronous for the surface.

use refbox_application::ports::authority::{AuthorityNotifier, ReportEnvelope};
use refbox_domain::{SurfaceId, VoteReport};
use tokio::sync::mpsc;
use tracing::warn;

pub struct ChannelAuthority {
    reports: mpsc::UnboundedSender<ReportEnvelope>,
}

impl ChannelAuthority {
    pub fn new(reports: mpsc::UnboundedSender<ReportEnvelope>) -> Self {
        Self { reports }
    }
}

impl AuthorityNotifier for ChannelAuthority {
    fn report_votes(&self, origin: SurfaceId, report: &VoteReport) {
        let envelope = ReportEnvelope {
            origin,
            report: *report,
        };
        if self.reports.send(envelope).is_err() {
            warn!("{}: scoring authority is gone, report dropped", origin);
        }
    }
}
