//! Poll policy - bounded retry with a fixed interval.

use std::time::Duration;

/// Default number of status checks before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Default pause before each status check.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long the poller waits for a run.
///
/// The budget is wall-clock bounded: `max_attempts` status checks, each
/// preceded by one `poll_interval` sleep, regardless of how often the
/// reported status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl PollPolicy {
    /// Creates a policy with explicit limits.
    pub fn new(max_attempts: u32, poll_interval: Duration) -> Self {
        Self {
            max_attempts,
            poll_interval,
        }
    }

    /// Zero-delay policy for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Upper bound on the time spent sleeping between checks.
    pub fn max_wait(&self) -> Duration {
        self.poll_interval.saturating_mul(self.max_attempts)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL)
    }
}
