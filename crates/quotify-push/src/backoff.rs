//! Reconnect backoff policy
//!
//! Delays double from `initial_delay` and are capped at `max_delay`. The
//! attempt counter resets to 0 whenever a connection opens successfully.

use std::time::Duration;

/// Backoff policy for reconnecting the push channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Delay before the first reconnect attempt
    pub initial_delay: Duration,
    /// Cap for the exponential growth
    pub max_delay: Duration,
    /// Number of reconnects scheduled before giving up
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            max_attempts: 5,
        }
    }
}

impl ReconnectPolicy {
    /// Create a policy with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial delay
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the delay cap
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the number of reconnects scheduled before giving up
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Delay for a given attempt number: `min(initial * 2^attempt, max)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let doubled = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        doubled.min(self.max_delay)
    }

    /// Delay for the next reconnect, or `None` once attempts are exhausted
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            None
        } else {
            Some(self.delay_for(attempt))
        }
    }
}
