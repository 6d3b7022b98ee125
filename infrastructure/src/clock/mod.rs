//! System wall clock

use refbox_application::ports::clock::Clock;
use refbox_domain::Timestamp;

/// Clock reading the host's UTC time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Timestamp {
        // Pre-1970 clocks are clamped to the epoch.
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}
