//! Time access for builders and the readiness waiter.
//!
//! Block timestamps and backoff sleeps go through the [Clock] trait so tests
//! can drive time manually instead of sleeping on the wall clock.

use std::{
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// A source of wall-clock time that can also block the calling thread.
pub trait Clock {
    /// Returns the current wall-clock time.
    fn current(&self) -> SystemTime;

    /// Blocks the calling thread for the given duration.
    fn sleep(&self, duration: Duration);

    /// Returns the current time as milliseconds since the Unix epoch.
    ///
    /// A clock set before the epoch saturates to zero.
    ///
    /// (Provided method).
    fn epoch_millis(&self) -> u64 {
        self.current()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// The system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current(&self) -> SystemTime {
        SystemTime::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_epoch_millis() {
        let clock = SystemClock;
        let first = clock.epoch_millis();
        assert!(first > 0);
        assert!(clock.epoch_millis() >= first);
    }
}
