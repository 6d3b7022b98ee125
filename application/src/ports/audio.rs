//! Audio cue port
//!
//! The cue generator behind a tone cannot be restarted once it has played,
//! so a tone is acquired for each round and consumed by value when played.
//! Re-playing the same tone is impossible by construction.

/// A one-shot tone
pub trait CueTone: Send {
    /// Play the tone. Consumes it.
    fn play(self: Box<Self>);
}

/// Source of fresh tones
pub trait AudioCue: Send + Sync {
    /// Acquire a tone for the next round, or `None` if audio is unavailable.
    fn acquire(&self) -> Option<Box<dyn CueTone>>;
}

/// Audio source that never produces a tone
pub struct NoAudio;

impl AudioCue for NoAudio {
    fn acquire(&self) -> Option<Box<dyn CueTone>> {
        None
    }
}
