//! Terminal bell audio cue
//!
//! Rings the terminal bell for the down signal. Frequency and duration are
//! carried on each tone so a real tone generator can replace the bell
//! without changing callers.

use refbox_application::ports::audio::{AudioCue, CueTone};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Produces one [`BellTone`] per round
pub struct TerminalBell {
    frequency_hz: u32,
    duration: Duration,
    played: Arc<AtomicU64>,
}

impl TerminalBell {
    pub fn new(frequency_hz: u32, duration: Duration) -> Self {
        Self {
            frequency_hz,
            duration,
            played: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of tones rung so far.
    pub fn played(&self) -> u64 {
        self.played.load(Ordering::Relaxed)
    }
}

impl AudioCue for TerminalBell {
    fn acquire(&self) -> Option<Box<dyn CueTone>> {
        if self.duration.is_zero() {
            return None;
        }
        Some(Box::new(BellTone {
            frequency_hz: self.frequency_hz,
            duration: self.duration,
            played: Arc::clone(&self.played),
        }))
    }
}

/// A single ring of the bell
pub struct BellTone {
    frequency_hz: u32,
    duration: Duration,
    played: Arc<AtomicU64>,
}

impl CueTone for BellTone {
    fn play(self: Box<Self>) {
        debug!(
            "Down cue: {} Hz for {} ms",
            self.frequency_hz,
            self.duration.as_millis()
        );
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            warn!("Could not ring terminal bell: {}", e);
        }
        self.played.fetch_add(1, Ordering::Relaxed);
    }
}
