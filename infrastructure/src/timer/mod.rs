//! Tokio-backed hide timer
//!
//! Each scheduled hide is a spawned task racing `sleep` against its
//! cancellation token. When the sleep wins, `HideDown` is posted back into the
//! owning surface's command channel, so the hide runs on the surface's event
//! loop like any other input.

use refbox_application::ports::timer::{HideTicket, HideTimer, ScheduledHide};
use refbox_application::use_cases::surface_runner::SurfaceCommand;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Posts `HideDown` to one surface after a delay
pub struct TokioHideTimer {
    commands: mpsc::UnboundedSender<SurfaceCommand>,
}

impl TokioHideTimer {
    pub fn new(commands: mpsc::UnboundedSender<SurfaceCommand>) -> Self {
        Self { commands }
    }
}

impl HideTimer for TokioHideTimer {
    fn schedule_hide(&self, delay: Duration, ticket: HideTicket) -> ScheduledHide {
        let token = CancellationToken::new();
        let guard = token.clone();
        let commands = self.commands.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {
                    trace!("Hide #{} for round {} cancelled", ticket.seq, ticket.epoch);
                }
                _ = tokio::time::sleep(delay) => {
                    // The runner may have shut down in the meantime.
                    let _ = commands.send(SurfaceCommand::HideDown { ticket });
                }
            }
        });

        ScheduledHide::new(ticket, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refbox_domain::RoundEpoch;

    fn ticket(epoch: u64, seq: u64) -> HideTicket {
        HideTicket::new(RoundEpoch::new(epoch), seq)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioHideTimer::new(tx);
        let ticket = ticket(3, 1);

        let _pending = timer.schedule_hide(Duration::from_millis(2000), ticket);
        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(SurfaceCommand::HideDown { ticket }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_hide_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioHideTimer::new(tx);

        let pending = timer.schedule_hide(Duration::from_millis(500), ticket(0, 1));
        pending.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        drop(timer);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let timer = TokioHideTimer::new(tx);

        let pending = timer.schedule_hide(Duration::from_millis(10), ticket(1, 1));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!pending.is_cancelled());
    }
}
