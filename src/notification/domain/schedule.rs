//! Fixed retry ladder for callback delivery.

use std::time::Duration;

/// Delays applied after each failed delivery attempt.
///
/// The number of delays is the number of attempts. The delay is also slept
/// after the final failed attempt, so an exhausted ladder takes at least the
/// sum of all delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl RetrySchedule {
    /// Per-attempt request timeout for callback delivery.
    pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

    const DEFAULT_DELAY_SECS: [u64; 4] = [1, 2, 4, 8];

    /// Creates a schedule from explicit delays.
    #[must_use]
    pub const fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Returns the delays in attempt order.
    #[must_use]
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Returns the maximum number of delivery attempts.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }

    /// Returns the total time slept when every attempt fails.
    #[must_use]
    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl Default for RetrySchedule {
    /// Four attempts with delays of 1s, 2s, 4s and 8s.
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DELAY_SECS
                .into_iter()
                .map(Duration::from_secs)
                .collect(),
        )
    }
}
