//! Run polling configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::run::{PollPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};

/// How long to wait for a run to finish
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Number of status checks before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause before each status check, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl PollingConfig {
    /// Get the poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Policy handed to the run poller
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.max_attempts, self.poll_interval())
    }

    /// Validate polling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        Ok(())
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}
