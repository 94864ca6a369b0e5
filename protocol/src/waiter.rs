//! Node readiness.
//!
//! Node startup is asynchronous relative to test execution; failing fast on
//! the first connection refusal would make every test flaky. The waiter
//! retries a lightweight status call with exponential backoff, starting at
//! one second and doubling up to a ten second ceiling, until the node
//! responds or an optional deadline elapses.

use crate::{clock::Clock, rpc::Client, Error};
use std::{cmp, time::Duration};
use tracing::debug;

/// Initial delay between readiness probes.
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Ceiling for the probe delay.
pub const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Blocks until the node answers a head-info call.
///
/// With no deadline, retries indefinitely. With a deadline, returns
/// [Error::Timeout] once the next backoff would not complete before the
/// deadline elapses.
pub fn await_ready(
    client: &impl Client,
    clock: &impl Clock,
    deadline: Option<Duration>,
) -> Result<(), Error> {
    let started = clock.current();
    let mut backoff = INITIAL_BACKOFF;
    loop {
        if client.get_head_info().is_ok() {
            return Ok(());
        }

        if let Some(deadline) = deadline {
            let elapsed = clock
                .current()
                .duration_since(started)
                .unwrap_or_default();
            if elapsed + backoff > deadline {
                return Err(Error::Timeout);
            }
        }

        debug!(?backoff, "waiting for chain to be ready");
        clock.sleep(backoff);
        backoff = cmp::min(backoff * 2, MAX_BACKOFF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks;

    #[test]
    fn test_immediate_success_sleeps_never() {
        let client = mocks::Client::default();
        let clock = mocks::Clock::new(0);
        await_ready(&client, &clock, None).unwrap();
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_three_failures_backoff_schedule() {
        let client = mocks::Client::default().fail_head_info(3);
        let clock = mocks::Clock::new(0);
        await_ready(&client, &clock, None).unwrap();
        assert_eq!(
            clock.sleeps(),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
        );
    }

    #[test]
    fn test_backoff_is_capped() {
        let client = mocks::Client::default().fail_head_info(6);
        let clock = mocks::Clock::new(0);
        await_ready(&client, &clock, None).unwrap();
        assert_eq!(
            clock.sleeps(),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(10),
                Duration::from_secs(10),
            ],
        );
    }

    #[test]
    fn test_deadline_reports_timeout() {
        let client = mocks::Client::default().fail_head_info(usize::MAX);
        let clock = mocks::Clock::new(0);
        let result = await_ready(&client, &clock, Some(Duration::from_secs(5)));
        assert!(matches!(result, Err(Error::Timeout)));
        // Slept 1s and 2s; the 4s probe would overrun the 5s deadline.
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_secs(1), Duration::from_secs(2)],
        );
    }
}
