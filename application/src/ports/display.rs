//! Display port
//!
//! The aggregator decides *what* a board shows; adapters decide how it is
//! drawn (terminal, LED panel, web page).

use refbox_domain::{Surface, VoteReport};

/// Renders the visible state of one decision display
pub trait DisplayAdapter: Send + Sync {
    fn render(&self, surface: &Surface);

    /// Jury consoles also get the individual vote times.
    fn render_jury_detail(&self, _report: &VoteReport) {}
}

/// Display that draws nothing
pub struct NoDisplay;

impl DisplayAdapter for NoDisplay {
    fn render(&self, _surface: &Surface) {}
}
