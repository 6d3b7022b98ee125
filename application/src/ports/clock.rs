//! Wall-clock port used to timestamp keypad votes

use refbox_domain::Timestamp;

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> Timestamp;
}

/// Clock frozen at a given instant
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now_millis(&self) -> Timestamp {
        self.0
    }
}
