//! Retry policy derived from the step inputs.

use std::time::Duration;

/// A constant-delay retry policy.
///
/// Policies are pure data: they describe retry behavior but don't execute it.
/// Attempts are counted from 1, and `max_attempts` includes the first attempt,
/// so `with_max_attempts(3)` allows up to 2 retries.
///
/// # Examples
///
/// ```rust
/// use retry_step::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::constant(Duration::from_secs(10)).with_max_attempts(3);
///
/// // After the 1st and 2nd failed attempts, wait 10s; after the 3rd, stop.
/// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_secs(10)));
/// assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_secs(10)));
/// assert_eq!(policy.delay_for_attempt(3), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    /// Create a policy with constant delay between attempts.
    ///
    /// The policy allows a single attempt until
    /// [`with_max_attempts`](RetryPolicy::with_max_attempts) raises it.
    pub fn constant(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: 1,
        }
    }

    /// Set the total number of attempts, including the first.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The delay to wait after `attempt` (1-indexed) failed.
    ///
    /// Returns None if no more attempts should be made.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        Some(self.delay)
    }

    /// Attempts left after `attempt` (1-indexed) has been made.
    pub fn attempts_remaining(&self, attempt: u32) -> u32 {
        self.max_attempts.saturating_sub(attempt)
    }
}
