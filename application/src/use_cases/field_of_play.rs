//! Field-of-play loopback authority
//!
//! Stands in for the scoring server on a single platform. It receives the
//! vote reports of the referee surface and tells the other displays what to
//! show, following the server's broadcast rules:
//!
//! | Trigger | Broadcast |
//! |---------|-----------|
//! | first majority of the attempt | every surface but the origin: `ShowDown` |
//! | any vote report | jury consoles: `ShowDecisionsForJury` now |
//! | third vote cast | public/athlete boards: `ShowDecisions` after the reveal delay |
//! | vote changed while the reveal is pending | pending `ShowDecisions` replaced, delay restarts |
//! | reset | every surface: `Reset`, pending delayed broadcasts dropped |
//!
//! Within one report the down signal is planned before the jury details, so a
//! jury console that gets both sees the arrow first and the lights last.
//!
//! The planner is synchronous and returns [`Broadcast`]s; delivery is done by
//! [`SurfaceDirectory`](super::surface_runner::SurfaceDirectory).

use super::surface_runner::{Broadcast, SurfaceCommand};
use crate::config::FieldOfPlayConfig;
use refbox_domain::{Decision, Role, SurfaceId, Vote, VoteReport};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct FieldOfPlay {
    config: FieldOfPlayConfig,
    roster: Vec<(SurfaceId, Role)>,
    /// Cancelled on reset so delayed decisions of the old attempt never land
    attempt: CancellationToken,
    down_sent: bool,
    pending_decision: Option<PendingDecision>,
    last_report: Option<VoteReport>,
}

/// Delayed board reveal that has not been delivered yet
struct PendingDecision {
    votes: [Vote; 3],
    /// Child of the attempt token
    token: CancellationToken,
}

impl FieldOfPlay {
    pub fn new(config: FieldOfPlayConfig) -> Self {
        Self {
            config,
            roster: Vec::new(),
            attempt: CancellationToken::new(),
            down_sent: false,
            pending_decision: None,
            last_report: None,
        }
    }

    /// Add a display to the platform.
    pub fn register(&mut self, id: SurfaceId, role: Role) {
        if !self.roster.iter().any(|(existing, _)| *existing == id) {
            self.roster.push((id, role));
        }
    }

    /// React to a vote report from `origin`.
    pub fn on_report(&mut self, origin: SurfaceId, report: VoteReport) -> Vec<Broadcast> {
        debug!("Report from {}: {}", origin, report.summary());
        self.last_report = Some(report);
        let mut out = Vec::new();

        if !self.down_sent && report.majority().is_known() {
            self.down_sent = true;
            info!("Down signal ({})", report.majority());
            let silent = self.config.emit_sounds_on_server;
            for (id, _) in self.roster.iter().filter(|(id, _)| *id != origin) {
                out.push(Broadcast::now(
                    *id,
                    SurfaceCommand::ShowDown {
                        is_master: false,
                        silent,
                    },
                ));
            }
        }

        for (id, _) in self.jury_surfaces().filter(|(id, _)| *id != origin) {
            out.push(Broadcast::now(id, SurfaceCommand::ShowDecisionsForJury(report)));
        }

        if report.is_complete() {
            out.extend(self.schedule_decision(report));
        }

        out
    }

    /// Next attempt: every surface resets.
    pub fn reset(&mut self) -> Vec<Broadcast> {
        self.attempt.cancel();
        self.attempt = CancellationToken::new();
        self.down_sent = false;
        self.pending_decision = None;
        self.last_report = None;
        self.to_all(SurfaceCommand::Reset { is_master: false })
    }

    pub fn clock_started(&self) -> Vec<Broadcast> {
        self.to_all(SurfaceCommand::ClockStarted)
    }

    pub fn clock_stopped(&self) -> Vec<Broadcast> {
        self.to_all(SurfaceCommand::ClockStopped)
    }

    pub fn break_started(&self) -> Vec<Broadcast> {
        self.to_all(SurfaceCommand::BreakStarted)
    }

    /// Decision of the current attempt as last reported.
    pub fn decision(&self) -> Decision {
        self.last_report
            .map(|r| r.final_value())
            .unwrap_or_default()
    }

    /// Plan the delayed board reveal for a complete report. A report whose
    /// votes differ from the pending reveal replaces it; the same votes again
    /// change nothing.
    fn schedule_decision(&mut self, report: VoteReport) -> Vec<Broadcast> {
        if let Some(pending) = &self.pending_decision {
            if pending.votes == report.votes {
                return Vec::new();
            }
            debug!("Vote changed before reveal, rescheduling");
            pending.token.cancel();
        }

        info!("Decision {}: {}", report.summary(), report.final_value());
        let token = self.attempt.child_token();
        let out = self
            .roster
            .iter()
            .filter(|(_, role)| !role.is_jury())
            .map(|(id, _)| {
                Broadcast::after(
                    *id,
                    SurfaceCommand::ShowDecisions {
                        is_master: false,
                        votes: report.votes,
                    },
                    self.config.decision_reveal,
                    token.clone(),
                )
            })
            .collect();
        self.pending_decision = Some(PendingDecision {
            votes: report.votes,
            token,
        });
        out
    }

    fn to_all(&self, command: SurfaceCommand) -> Vec<Broadcast> {
        self.roster
            .iter()
            .map(|(id, _)| Broadcast::now(*id, command.clone()))
            .collect()
    }

    fn jury_surfaces(&self) -> impl Iterator<Item = (SurfaceId, Role)> + '_ {
        self.roster.iter().copied().filter(|(_, role)| role.is_jury())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceConfig;
    use crate::use_cases::aggregate_decision::test_support::Harness;
    use crate::use_cases::surface_runner::dispatch;
    use refbox_domain::{LightColor, RevealPhase, Surface};
    use std::time::Duration;

    const MASTER: SurfaceId = SurfaceId(1);
    const ATHLETE: SurfaceId = SurfaceId(2);
    const JURY: SurfaceId = SurfaceId(3);

    fn platform() -> FieldOfPlay {
        let mut fop = FieldOfPlay::new(FieldOfPlayConfig::default());
        fop.register(MASTER, Role::Referee);
        fop.register(ATHLETE, Role::Referee);
        fop.register(JURY, Role::Jury);
        fop
    }

    fn report(votes: [Vote; 3]) -> VoteReport {
        VoteReport::new(votes, [1; 3])
    }

    fn targets(
        broadcasts: &[Broadcast],
        pred: impl Fn(&SurfaceCommand) -> bool,
    ) -> Vec<SurfaceId> {
        broadcasts
            .iter()
            .filter(|b| pred(&b.command))
            .map(|b| b.target)
            .collect()
    }

    #[test]
    fn test_single_vote_goes_to_jury_only() {
        let mut fop = platform();
        let out = fop.on_report(MASTER, report([Vote::White, Vote::Unset, Vote::Unset]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, JURY);
        assert!(matches!(
            out[0].command,
            SurfaceCommand::ShowDecisionsForJury(_)
        ));
        assert!(out[0].delay.is_zero());
    }

    #[test]
    fn test_majority_sends_down_to_others_once() {
        let mut fop = platform();
        fop.on_report(MASTER, report([Vote::Red, Vote::Unset, Vote::Unset]));
        let out = fop.on_report(MASTER, report([Vote::Red, Vote::Red, Vote::Unset]));

        let downs = targets(&out, |c| matches!(c, SurfaceCommand::ShowDown { .. }));
        assert_eq!(downs, vec![ATHLETE, JURY]);

        let again = fop.on_report(MASTER, report([Vote::Red, Vote::Red, Vote::Unset]));
        assert!(targets(&again, |c| matches!(c, SurfaceCommand::ShowDown { .. })).is_empty());
    }

    #[test]
    fn test_down_silenced_when_server_plays_sound() {
        let mut fop = FieldOfPlay::new(FieldOfPlayConfig {
            emit_sounds_on_server: true,
            ..FieldOfPlayConfig::default()
        });
        fop.register(MASTER, Role::Referee);
        fop.register(ATHLETE, Role::Referee);
        let out = fop.on_report(MASTER, report([Vote::White, Vote::White, Vote::Unset]));
        assert_eq!(
            out[0].command,
            SurfaceCommand::ShowDown {
                is_master: false,
                silent: true
            }
        );
    }

    #[test]
    fn test_full_decision_delayed_to_boards() {
        let mut fop = platform();
        let out = fop.on_report(MASTER, report([Vote::White, Vote::Red, Vote::Red]));

        let decisions: Vec<&Broadcast> = out
            .iter()
            .filter(|b| matches!(b.command, SurfaceCommand::ShowDecisions { .. }))
            .collect();
        assert_eq!(
            decisions.iter().map(|b| b.target).collect::<Vec<_>>(),
            vec![MASTER, ATHLETE]
        );
        for b in &decisions {
            assert_eq!(b.delay, Duration::from_millis(3000));
            assert!(b.guard.is_some());
        }
        assert_eq!(fop.decision(), Decision::Red);
    }

    #[test]
    fn test_reset_broadcasts_and_cancels_pending() {
        let mut fop = platform();
        let out = fop.on_report(MASTER, report([Vote::White, Vote::White, Vote::White]));
        let guard = out
            .iter()
            .find_map(|b| b.guard.clone())
            .expect("delayed decision");

        let resets = fop.reset();
        assert!(guard.is_cancelled());
        assert_eq!(resets.len(), 3);
        assert!(
            resets
                .iter()
                .all(|b| b.command == SurfaceCommand::Reset { is_master: false })
        );
        assert_eq!(fop.decision(), Decision::Unknown);

        // New attempt gives the down signal again.
        let out = fop.on_report(MASTER, report([Vote::Red, Vote::Red, Vote::Unset]));
        assert_eq!(
            targets(&out, |c| matches!(c, SurfaceCommand::ShowDown { .. })).len(),
            2
        );
    }

    #[test]
    fn test_down_planned_before_jury_details() {
        let mut fop = platform();
        fop.on_report(MASTER, report([Vote::Red, Vote::Unset, Vote::Unset]));
        let out = fop.on_report(MASTER, report([Vote::Red, Vote::White, Vote::Red]));

        let to_jury: Vec<&SurfaceCommand> = out
            .iter()
            .filter(|b| b.target == JURY)
            .map(|b| &b.command)
            .collect();
        assert!(matches!(to_jury[0], SurfaceCommand::ShowDown { .. }));
        assert!(matches!(
            to_jury.last(),
            Some(SurfaceCommand::ShowDecisionsForJury(_))
        ));
    }

    #[test]
    fn test_jury_ends_on_lights_when_majority_forms_on_third_vote() {
        let h = Harness::new();
        let mut jury = h.with_config(SurfaceConfig::new(JURY).jury());
        let mut fop = platform();

        for votes in [
            [Vote::Red, Vote::Unset, Vote::Unset],
            [Vote::Red, Vote::White, Vote::Unset],
            [Vote::Red, Vote::White, Vote::Red],
        ] {
            for b in fop.on_report(MASTER, report(votes)) {
                if b.target == JURY {
                    dispatch(&mut jury, b.command);
                }
            }
        }

        assert_eq!(
            jury.surface(),
            &Surface::Lights([LightColor::Red, LightColor::White, LightColor::Red])
        );
        assert_eq!(jury.phase(), RevealPhase::Displaying);
    }

    #[test]
    fn test_changed_vote_reschedules_reveal_with_latest_votes() {
        let mut fop = platform();
        let first = fop.on_report(MASTER, report([Vote::White, Vote::Red, Vote::Red]));
        let stale: Vec<CancellationToken> =
            first.iter().filter_map(|b| b.guard.clone()).collect();
        assert_eq!(stale.len(), 2);

        // Referee 2 changes their mind inside the reveal delay.
        let second = fop.on_report(MASTER, report([Vote::White, Vote::White, Vote::Red]));
        assert!(stale.iter().all(|g| g.is_cancelled()));

        let fresh: Vec<&Broadcast> = second
            .iter()
            .filter(|b| matches!(b.command, SurfaceCommand::ShowDecisions { .. }))
            .collect();
        assert_eq!(
            fresh.iter().map(|b| b.target).collect::<Vec<_>>(),
            vec![MASTER, ATHLETE]
        );
        for b in &fresh {
            assert_eq!(
                b.command,
                SurfaceCommand::ShowDecisions {
                    is_master: false,
                    votes: [Vote::White, Vote::White, Vote::Red],
                }
            );
            assert_eq!(b.delay, Duration::from_millis(3000));
            assert!(b.guard.as_ref().is_some_and(|g| !g.is_cancelled()));
        }
        assert_eq!(fop.decision(), Decision::White);

        // Same votes again: the pending reveal stands.
        let repeat = fop.on_report(MASTER, report([Vote::White, Vote::White, Vote::Red]));
        assert!(targets(&repeat, |c| matches!(c, SurfaceCommand::ShowDecisions { .. })).is_empty());
        assert!(fresh.iter().all(|b| b.guard.as_ref().is_some_and(|g| !g.is_cancelled())));

        // Reset still drops the rescheduled reveal.
        fop.reset();
        assert!(fresh.iter().all(|b| b.guard.as_ref().is_some_and(|g| g.is_cancelled())));
    }

    #[test]
    fn test_lifecycle_goes_to_everyone() {
        let fop = platform();
        assert_eq!(fop.clock_started().len(), 3);
        assert!(
            fop.break_started()
                .iter()
                .all(|b| b.command == SurfaceCommand::BreakStarted)
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut fop = platform();
        fop.register(MASTER, Role::Referee);
        assert_eq!(fop.clock_stopped().len(), 3);
    }
}
