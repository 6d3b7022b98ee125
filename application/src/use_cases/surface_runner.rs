//! Surface event loop
//!
//! Each decision display is driven by one [`SurfaceRunner`] that owns its
//! [`DecisionAggregator`] and drains a channel of [`SurfaceCommand`]s. Keypad
//! input, timer fires and scoring-authority calls all arrive through the same
//! channel, so every event runs to completion before the next one starts.

use super::aggregate_decision::DecisionAggregator;
use crate::ports::timer::HideTicket;
use refbox_domain::{Role, SurfaceId, Timestamp, Vote, VoteReport};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Inbound events for one surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    /// Raw keypad key
    Key(char),
    /// Vote from a device that already knows slot and time
    CastVote { slot: u8, vote: Vote, at: Timestamp },
    /// Authority: give the down signal
    ShowDown { is_master: bool, silent: bool },
    /// Timer: the down arrow has been up long enough
    HideDown { ticket: HideTicket },
    /// Authority: final colors for a public or athlete board
    ShowDecisions { is_master: bool, votes: [Vote; 3] },
    /// Authority: colors and vote times for a jury console
    ShowDecisionsForJury(VoteReport),
    /// Authority: next attempt
    Reset { is_master: bool },
    /// Parent should hide this display
    HideDecisions,
    /// Athlete clock started: referees may vote
    ClockStarted,
    /// Athlete clock stopped: referees may still vote
    ClockStopped,
    /// Break started: keypads are ignored
    BreakStarted,
    /// Stop the runner
    Shutdown,
}

/// Apply one command to an aggregator.
///
/// Returns `false` when the runner should stop.
pub fn dispatch(aggregator: &mut DecisionAggregator, command: SurfaceCommand) -> bool {
    let result = match command {
        SurfaceCommand::Key(key) => aggregator.press_key(key).map(|_| ()),
        SurfaceCommand::CastVote { slot, vote, at } => {
            aggregator.cast_vote(slot, vote, at).map(|_| ())
        }
        SurfaceCommand::ShowDown { is_master, silent } => {
            aggregator.show_down(is_master, silent);
            Ok(())
        }
        SurfaceCommand::HideDown { ticket } => {
            aggregator.hide_down(ticket);
            Ok(())
        }
        SurfaceCommand::ShowDecisions { is_master, votes } => {
            let [v1, v2, v3] = votes;
            aggregator.show_decisions(is_master, v1, v2, v3);
            // Decision is final; keypads stay quiet until the next clock start.
            aggregator.set_enabled(false);
            Ok(())
        }
        SurfaceCommand::ShowDecisionsForJury(report) => {
            aggregator.show_decisions_for_jury(report);
            Ok(())
        }
        SurfaceCommand::Reset { is_master } => {
            aggregator.reset(is_master);
            Ok(())
        }
        SurfaceCommand::HideDecisions => {
            aggregator.hide_decisions();
            Ok(())
        }
        SurfaceCommand::ClockStarted | SurfaceCommand::ClockStopped => {
            aggregator.set_enabled(true);
            Ok(())
        }
        SurfaceCommand::BreakStarted => {
            aggregator.set_enabled(false);
            Ok(())
        }
        SurfaceCommand::Shutdown => return false,
    };

    if let Err(e) = result {
        if e.is_ignorable() {
            debug!("{} {}", aggregator.id(), e);
        } else {
            warn!("{} {}", aggregator.id(), e);
        }
    }
    true
}

/// Owns one aggregator and processes its commands in order
pub struct SurfaceRunner {
    aggregator: DecisionAggregator,
    commands: mpsc::UnboundedReceiver<SurfaceCommand>,
}

impl SurfaceRunner {
    pub fn new(
        aggregator: DecisionAggregator,
        commands: mpsc::UnboundedReceiver<SurfaceCommand>,
    ) -> Self {
        Self {
            aggregator,
            commands,
        }
    }

    /// Run until `Shutdown` or until every sender is dropped.
    ///
    /// Hands the aggregator back so callers can inspect the final state.
    pub async fn run(mut self) -> DecisionAggregator {
        debug!("{} runner started", self.aggregator.id());
        while let Some(command) = self.commands.recv().await {
            if !dispatch(&mut self.aggregator, command) {
                break;
            }
        }
        debug!("{} runner stopped", self.aggregator.id());
        self.aggregator
    }
}

/// Sending side of a surface's command channel
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    pub id: SurfaceId,
    pub role: Role,
    sender: mpsc::UnboundedSender<SurfaceCommand>,
}

impl SurfaceHandle {
    pub fn new(id: SurfaceId, role: Role, sender: mpsc::UnboundedSender<SurfaceCommand>) -> Self {
        Self { id, role, sender }
    }

    /// Queue a command. Returns `false` if the runner is gone.
    pub fn send(&self, command: SurfaceCommand) -> bool {
        self.sender.send(command).is_ok()
    }
}

/// A command addressed to one surface, possibly after a delay
#[derive(Debug, Clone)]
pub struct Broadcast {
    pub target: SurfaceId,
    pub command: SurfaceCommand,
    pub delay: Duration,
    /// Cancelled when the attempt the broadcast belongs to is reset
    pub guard: Option<CancellationToken>,
}

impl Broadcast {
    pub fn now(target: SurfaceId, command: SurfaceCommand) -> Self {
        Self {
            target,
            command,
            delay: Duration::ZERO,
            guard: None,
        }
    }

    pub fn after(
        target: SurfaceId,
        command: SurfaceCommand,
        delay: Duration,
        guard: CancellationToken,
    ) -> Self {
        Self {
            target,
            command,
            delay,
            guard: Some(guard),
        }
    }
}

/// Routes broadcasts to surfaces by id
#[derive(Debug, Default, Clone)]
pub struct SurfaceDirectory {
    handles: HashMap<SurfaceId, SurfaceHandle>,
}

impl SurfaceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: SurfaceHandle) {
        self.handles.insert(handle.id, handle);
    }

    pub fn get(&self, id: SurfaceId) -> Option<&SurfaceHandle> {
        self.handles.get(&id)
    }

    pub fn handles(&self) -> impl Iterator<Item = &SurfaceHandle> {
        self.handles.values()
    }

    /// Deliver a broadcast: immediately, or from a spawned task after its delay.
    ///
    /// Delayed broadcasts are dropped if their guard is cancelled first.
    /// Must be called from within a tokio runtime.
    pub fn deliver(&self, broadcast: Broadcast) {
        let Some(handle) = self.handles.get(&broadcast.target).cloned() else {
            warn!("No surface registered as {}", broadcast.target);
            return;
        };

        if broadcast.delay.is_zero() {
            if !handle.send(broadcast.command) {
                debug!("{} is no longer running", handle.id);
            }
            return;
        }

        let guard = broadcast.guard.unwrap_or_else(CancellationToken::new);
        tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {
                    debug!("{} delayed broadcast cancelled", handle.id);
                }
                _ = tokio::time::sleep(broadcast.delay) => {
                    handle.send(broadcast.command);
                }
            }
        });
    }

    pub fn deliver_all(&self, broadcasts: impl IntoIterator<Item = Broadcast>) {
        for broadcast in broadcasts {
            self.deliver(broadcast);
        }
    }

    /// Send the same command to every surface.
    pub fn send_all(&self, command: SurfaceCommand) {
        for handle in self.handles.values() {
            handle.send(command.clone());
        }
    }
}
