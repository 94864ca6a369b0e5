//! Wall-clock guard for test bodies.
//!
//! Runs alongside a test solely to fail it after a fixed duration — a
//! cooperative cancellation signal, not a data-sharing concern. A hung
//! network call would otherwise stall the whole suite.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::error;

/// Aborts the process if not disarmed within the armed duration.
///
/// Disarms automatically on drop, so a test that completes (or panics and
/// unwinds) releases its watchdog.
pub struct Watchdog {
    disarm: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Watchdog {
    /// Arms a watchdog for the given duration.
    pub fn arm(duration: Duration) -> Self {
        let (disarm, expiry) = mpsc::channel();
        let handle = thread::spawn(move || {
            match expiry.recv_timeout(duration) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
                Err(RecvTimeoutError::Timeout) => {
                    error!(?duration, "watchdog expired, aborting");
                    std::process::abort();
                }
            }
        });
        Self {
            disarm: Some(disarm),
            handle: Some(handle),
        }
    }

    /// Disarms the watchdog explicitly.
    pub fn disarm(self) {}
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        if let Some(disarm) = self.disarm.take() {
            // The watchdog thread may have already exited; nothing to do then.
            let _ = disarm.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
