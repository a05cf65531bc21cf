//! Retry policy for the radio wait step
//!
//! Waiting for the peer's next record is the only blocking point in the
//! protocol. The wait is a bounded poll: up to `max_attempts` availability
//! checks, `poll_delay` apart. Expressing it as attempts x delay keeps the
//! timeout explicit and lets tests drive it with a paused clock.

use std::time::Duration;

/// Default poll attempts before a multi-record operation is abandoned
pub const LINK_WAIT_NUMRETRY: u32 = 64;

/// Default delay between availability polls
pub const LINK_POLL_DELAY: Duration = Duration::from_millis(5);

/// Bounded wait policy for the peer's next record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Availability checks before giving up
    pub max_attempts: u32,
    /// Pause between checks
    pub poll_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, poll_delay: Duration) -> Self {
        RetryPolicy {
            max_attempts,
            poll_delay,
        }
    }

    /// Worst-case wall-clock wait per record
    pub fn budget(&self) -> Duration {
        self.poll_delay * self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: LINK_WAIT_NUMRETRY,
            poll_delay: LINK_POLL_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, LINK_WAIT_NUMRETRY);
        assert_eq!(policy.poll_delay, LINK_POLL_DELAY);
    }

    #[test]
    fn test_budget() {
        let policy = RetryPolicy::new(10, Duration::from_millis(5));
        assert_eq!(policy.budget(), Duration::from_millis(50));
    }
}
