//! Decision aggregation use case
//!
//! [`DecisionAggregator`] is the state machine behind one decision display.
//! It ingests referee votes, evaluates the majority, gives the down signal
//! once per round, schedules the arrow's auto-hide and renders the lights the
//! scoring authority pushes back.
//!
//! # Flow
//!
//! ```text
//! keypad ─▶ cast_vote ─▶ report_votes (authority) ─▶ evaluate
//!                                                      │ first majority
//!                                                      ▼
//!                         show_down: arrow, tone, `down` event, schedule hide
//!                                                      │ 2000 ms
//!                                                      ▼
//!                         hide_down: lights ◀── show_decisions (authority)
//!                                                      │
//!                         reset: cancel hide, clear votes, fresh tone
//! ```
//!
//! Every method runs to completion before the next event is handled; the
//! owning [`SurfaceRunner`](super::surface_runner::SurfaceRunner) guarantees
//! that, so no locking is needed here.

use crate::config::SurfaceConfig;
use crate::ports::audio::{AudioCue, CueTone, NoAudio};
use crate::ports::authority::{AuthorityNotifier, NoAuthority};
use crate::ports::clock::{Clock, FixedClock};
use crate::ports::display::{DisplayAdapter, NoDisplay};
use crate::ports::surface_event::{NoSurfaceEvents, SurfaceEvent, SurfaceEventSink};
use crate::ports::timer::{HideTicket, HideTimer, NoTimer, ScheduledHide};
use refbox_domain::{
    Decision, DecisionError, DecisionRound, DisplayOrientation, LightColor, REFEREE_COUNT,
    RefereeSlot, RejectReason, RevealPhase, Role, Surface, SurfaceId, Timestamp, Vote,
    VoteReport, keypad, map_votes_to_display_positions,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Adapters a surface talks to
///
/// Every port defaults to a no-op so tests and partial wirings only set
/// what they need.
#[derive(Clone)]
pub struct SurfacePorts {
    pub display: Arc<dyn DisplayAdapter>,
    pub timer: Arc<dyn HideTimer>,
    pub audio: Arc<dyn AudioCue>,
    pub authority: Arc<dyn AuthorityNotifier>,
    pub events: Arc<dyn SurfaceEventSink>,
    pub clock: Arc<dyn Clock>,
}

impl Default for SurfacePorts {
    fn default() -> Self {
        Self {
            display: Arc::new(NoDisplay),
            timer: Arc::new(NoTimer),
            audio: Arc::new(NoAudio),
            authority: Arc::new(NoAuthority),
            events: Arc::new(NoSurfaceEvents),
            clock: Arc::new(FixedClock(0)),
        }
    }
}

impl SurfacePorts {
    pub fn with_display(mut self, display: Arc<dyn DisplayAdapter>) -> Self {
        self.display = display;
        self
    }

    pub fn with_timer(mut self, timer: Arc<dyn HideTimer>) -> Self {
        self.timer = timer;
        self
    }

    pub fn with_audio(mut self, audio: Arc<dyn AudioCue>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_authority(mut self, authority: Arc<dyn AuthorityNotifier>) -> Self {
        self.authority = authority;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn SurfaceEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Referee-decision state machine for one display
pub struct DecisionAggregator {
    id: SurfaceId,
    orientation: DisplayOrientation,
    role: Role,
    audio_enabled: bool,
    enabled: bool,
    down_display: Duration,
    round: DecisionRound,
    /// Light colors in display-position order; shown whenever the arrow is not
    lights: [LightColor; REFEREE_COUNT],
    surface: Surface,
    pending_hide: Option<ScheduledHide>,
    hide_seq: u64,
    tone: Option<Box<dyn CueTone>>,
    last_jury_report: Option<VoteReport>,
    ports: SurfacePorts,
}

impl DecisionAggregator {
    pub fn new(config: SurfaceConfig, ports: SurfacePorts) -> Self {
        let mut aggregator = Self {
            id: config.id,
            orientation: config.orientation(),
            role: config.role(),
            audio_enabled: config.audio_enabled,
            enabled: config.enabled,
            down_display: config.down_display,
            round: DecisionRound::default(),
            lights: [LightColor::Neutral; REFEREE_COUNT],
            surface: Surface::Hidden,
            pending_hide: None,
            hide_seq: 0,
            tone: None,
            last_jury_report: None,
            ports,
        };
        aggregator.init();
        aggregator
    }

    // ==================== Vote Ingestion ====================

    /// Handle a keypad key. Keys outside the referee map are ignored.
    ///
    /// Returns the current final decision, as [`cast_vote`](Self::cast_vote).
    pub fn press_key(&mut self, key: char) -> Result<Decision, DecisionError> {
        match keypad::map_key(key) {
            Some((slot, vote)) => {
                let at = self.ports.clock.now_millis();
                self.ingest(slot, vote, at)
            }
            None => {
                debug!("{} ignoring key {:?}", self.id, key);
                Ok(self.round.final_value())
            }
        }
    }

    /// Record referee `slot`'s vote, overwriting any earlier one.
    ///
    /// Reports the vote vector to the authority, then re-evaluates the
    /// majority. Returns the final decision (`Unknown` until all three
    /// referees have voted).
    pub fn cast_vote(
        &mut self,
        slot: u8,
        vote: Vote,
        at: Timestamp,
    ) -> Result<Decision, DecisionError> {
        let slot = RefereeSlot::new(slot)?;
        self.ingest(slot, vote, at)
    }

    fn ingest(
        &mut self,
        slot: RefereeSlot,
        vote: Vote,
        at: Timestamp,
    ) -> Result<Decision, DecisionError> {
        if !self.role.behavior().accepts_direct_input {
            return Err(DecisionError::InputRejected(RejectReason::JuryInput));
        }
        if !self.enabled {
            return Err(DecisionError::InputRejected(RejectReason::Disarmed));
        }

        self.round.cast(slot, vote, at)?;
        debug!("{} {} voted {} at {}", self.id, slot, vote, at);

        // The authority sees the vote before any reveal it causes.
        self.ports
            .authority
            .report_votes(self.id, &self.round.report());

        Ok(self.evaluate_majority())
    }

    // ==================== Majority Evaluation ====================

    /// Evaluate the live votes; gives the down signal on first majority.
    fn evaluate_majority(&mut self) -> Decision {
        let evaluation = self.round.evaluate();
        if evaluation.first_majority && self.role.behavior().originates_reveal {
            info!(
                "{} majority reached ({}), giving down signal",
                self.id, evaluation.majority
            );
            self.show_down(true, false);
        }
        if evaluation.final_value.is_known() {
            info!("{} decision: {}", self.id, evaluation.final_value);
        }
        evaluation.final_value
    }

    // ==================== Reveal Protocol ====================

    /// Show the down arrow. Has no effect if the down signal was already
    /// given this round.
    ///
    /// `silent` suppresses the tone (sound produced elsewhere).
    pub fn show_down(&mut self, is_master: bool, silent: bool) {
        if !self.round.mark_revealed() {
            debug!("{} down already shown this round", self.id);
            return;
        }
        debug!("{} show down (master={}, silent={})", self.id, is_master, silent);

        if let Some(next) = self.round.phase().reveal() {
            self.round.set_phase(next);
        }
        self.set_surface(Surface::DownArrow);

        if self.audio_enabled && !silent {
            self.play_tone();
        }

        self.ports.events.emit(self.id, SurfaceEvent::Down);

        if self.role.behavior().auto_hides_down {
            self.schedule_hide();
        }
    }

    fn schedule_hide(&mut self) {
        if let Some(previous) = self.pending_hide.take() {
            debug!("{} replacing pending hide", self.id);
            previous.cancel();
        }
        self.hide_seq += 1;
        let ticket = HideTicket::new(self.round.epoch(), self.hide_seq);
        let handle = self.ports.timer.schedule_hide(self.down_display, ticket);
        self.pending_hide = Some(handle);
    }

    /// Delayed hide fired: replace the arrow by the decision lights.
    ///
    /// Only the ticket of the pending hide is honoured. A hide scheduled for
    /// an earlier round, replaced by a later one, or cancelled is a no-op and
    /// leaves the pending hide in place.
    pub fn hide_down(&mut self, ticket: HideTicket) {
        if ticket.epoch != self.round.epoch() {
            debug!(
                "{} ignoring hide for round {} (current {})",
                self.id,
                ticket.epoch,
                self.round.epoch()
            );
            return;
        }
        let current = self
            .pending_hide
            .as_ref()
            .is_some_and(|h| h.ticket() == ticket && !h.is_cancelled());
        if !current {
            debug!("{} ignoring superseded hide #{}", self.id, ticket.seq);
            return;
        }
        self.pending_hide = None;
        if let Some(next) = self.round.phase().hide_down() {
            self.round.set_phase(next);
            self.set_surface(Surface::Lights(self.lights));
        }
    }

    /// Final colors pushed by the scoring authority.
    pub fn show_decisions(&mut self, is_master: bool, v1: Vote, v2: Vote, v3: Vote) {
        debug!(
            "{} show decisions (master={}): {} {} {}",
            self.id, is_master, v1, v2, v3
        );
        self.display_lights(v1, v2, v3);
    }

    /// Jury variant of [`show_decisions`](Self::show_decisions), with vote times.
    pub fn show_decisions_for_jury(&mut self, report: VoteReport) {
        let [v1, v2, v3] = report.votes;
        debug!("{} show decisions for jury: {}", self.id, report.summary());
        self.last_jury_report = Some(report);
        self.ports.display.render_jury_detail(&report);
        self.display_lights(v1, v2, v3);
    }

    fn display_lights(&mut self, v1: Vote, v2: Vote, v3: Vote) {
        self.lights = map_votes_to_display_positions(self.orientation, v1, v2, v3);
        self.round.set_phase(self.round.phase().show_decisions());
        self.set_surface(Surface::Lights(self.lights));
    }

    // ==================== Reset / Lifecycle ====================

    /// Start a new round: ask the parent to hide us, cancel the pending hide,
    /// clear all votes and acquire a fresh tone.
    pub fn reset(&mut self, is_master: bool) {
        debug!("{} reset (master={})", self.id, is_master);
        self.hide_decisions();
        self.round = self.round.next_round();
        self.init();
    }

    /// Ask the parent container to hide this display. Votes are untouched.
    pub fn hide_decisions(&mut self) {
        self.ports.events.emit(self.id, SurfaceEvent::Hide);
    }

    fn init(&mut self) {
        if let Some(pending) = self.pending_hide.take() {
            pending.cancel();
        }
        self.lights = [LightColor::Neutral; REFEREE_COUNT];
        self.last_jury_report = None;
        self.set_surface(Surface::Hidden);
        self.setup_audio();
    }

    /// Arm or disarm direct vote input.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!("{} enabled={}", self.id, enabled);
        }
        self.enabled = enabled;
    }

    // ==================== Audio ====================

    fn setup_audio(&mut self) {
        // Any tone left from the previous round is released, never reused.
        self.tone = None;
        if self.audio_enabled {
            self.tone = self.ports.audio.acquire();
        }
    }

    fn play_tone(&mut self) {
        match self.tone.take() {
            Some(tone) => tone.play(),
            None => debug!("{} no tone available", self.id),
        }
        self.setup_audio();
    }

    fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
        self.ports.display.render(&self.surface);
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn orientation(&self) -> DisplayOrientation {
        self.orientation
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn round(&self) -> &DecisionRound {
        &self.round
    }

    pub fn majority(&self) -> Decision {
        self.round.majority()
    }

    pub fn final_value(&self) -> Decision {
        self.round.final_value()
    }

    pub fn revealed(&self) -> bool {
        self.round.revealed()
    }

    pub fn phase(&self) -> RevealPhase {
        self.round.phase()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn has_pending_hide(&self) -> bool {
        self.pending_hide
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    pub fn has_tone(&self) -> bool {
        self.tone.is_some()
    }

    pub fn last_jury_report(&self) -> Option<&VoteReport> {
        self.last_jury_report.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ports::surface_event::SurfaceEvent;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_util::sync::CancellationToken;

    #[derive(Default)]
    pub struct RecordingDisplay {
        pub frames: Mutex<Vec<Surface>>,
        pub jury_details: Mutex<Vec<VoteReport>>,
    }

    impl DisplayAdapter for RecordingDisplay {
        fn render(&self, surface: &Surface) {
            self.frames.lock().unwrap().push(*surface);
        }

        fn render_jury_detail(&self, report: &VoteReport) {
            self.jury_details.lock().unwrap().push(*report);
        }
    }

    #[derive(Default)]
    pub struct ManualTimer {
        pub scheduled: Mutex<Vec<(Duration, ScheduledHide)>>,
    }

    impl ManualTimer {
        pub fn count(&self) -> usize {
            self.scheduled.lock().unwrap().len()
        }

        pub fn last(&self) -> ScheduledHide {
            self.scheduled.lock().unwrap().last().unwrap().1.clone()
        }
    }

    impl HideTimer for ManualTimer {
        fn schedule_hide(&self, delay: Duration, ticket: HideTicket) -> ScheduledHide {
            let handle = ScheduledHide::new(ticket, CancellationToken::new());
            self.scheduled.lock().unwrap().push((delay, handle.clone()));
            handle
        }
    }

    #[derive(Default)]
    pub struct CountingAudio {
        pub acquired: Arc<AtomicUsize>,
        pub played: Arc<AtomicUsize>,
    }

    struct CountingTone {
        played: Arc<AtomicUsize>,
    }

    impl CueTone for CountingTone {
        fn play(self: Box<Self>) {
            self.played.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl AudioCue for CountingAudio {
        fn acquire(&self) -> Option<Box<dyn CueTone>> {
            self.acquired.fetch_add(1, Ordering::SeqCst);
            Some(Box::new(CountingTone {
                played: Arc::clone(&self.played),
            }))
        }
    }

    impl CountingAudio {
        pub fn acquired(&self) -> usize {
            self.acquired.load(Ordering::SeqCst)
        }

        pub fn played(&self) -> usize {
            self.played.load(Ordering::SeqCst)
        }
    }

    /// Records reports and events in one ordered log.
    #[derive(Default)]
    pub struct Journal {
        pub entries: Mutex<Vec<Entry>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Entry {
        Report(VoteReport),
        Event(SurfaceEvent),
    }

    impl Journal {
        pub fn reports(&self) -> Vec<VoteReport> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    Entry::Report(r) => Some(*r),
                    Entry::Event(_) => None,
                })
                .collect()
        }

        pub fn events(&self) -> Vec<SurfaceEvent> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    Entry::Event(ev) => Some(*ev),
                    Entry::Report(_) => None,
                })
                .collect()
        }

        pub fn all(&self) -> Vec<Entry> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl AuthorityNotifier for Journal {
        fn report_votes(&self, _origin: SurfaceId, report: &VoteReport) {
            self.entries.lock().unwrap().push(Entry::Report(*report));
        }
    }

    impl SurfaceEventSink for Journal {
        fn emit(&self, _surface: SurfaceId, event: SurfaceEvent) {
            self.entries.lock().unwrap().push(Entry::Event(event));
        }
    }

    pub struct Harness {
        pub display: Arc<RecordingDisplay>,
        pub timer: Arc<ManualTimer>,
        pub audio: Arc<CountingAudio>,
        pub journal: Arc<Journal>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                display: Arc::new(RecordingDisplay::default()),
                timer: Arc::new(ManualTimer::default()),
                audio: Arc::new(CountingAudio::default()),
                journal: Arc::new(Journal::default()),
            }
        }

        pub fn ports(&self) -> SurfacePorts {
            SurfacePorts::default()
                .with_display(self.display.clone())
                .with_timer(self.timer.clone())
                .with_audio(self.audio.clone())
                .with_authority(self.journal.clone())
                .with_events(self.journal.clone())
                .with_clock(Arc::new(FixedClock(1_700_000_000_000)))
        }

        pub fn referee(&self) -> DecisionAggregator {
            DecisionAggregator::new(SurfaceConfig::new(SurfaceId(1)).armed(true), self.ports())
        }

        pub fn with_config(&self, config: SurfaceConfig) -> DecisionAggregator {
            DecisionAggregator::new(config, self.ports())
        }
    }
}
