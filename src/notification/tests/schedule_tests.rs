//! Retry schedule tests.

use crate::notification::domain::RetrySchedule;
use rstest::rstest;
use std::time::Duration;

#[rstest]
fn default_schedule_is_one_two_four_eight_seconds() {
    let schedule = RetrySchedule::default();

    assert_eq!(
        schedule.delays(),
        &[
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(8),
        ]
    );
    assert_eq!(schedule.max_attempts(), 4);
    assert_eq!(schedule.total_delay(), Duration::from_secs(15));
}

#[rstest]
fn attempt_timeout_is_ten_seconds() {
    assert_eq!(RetrySchedule::ATTEMPT_TIMEOUT, Duration::from_secs(10));
}

#[rstest]
fn empty_schedule_allows_no_attempts() {
    let schedule = RetrySchedule::new(Vec::new());
    assert_eq!(schedule.max_attempts(), 0);
    assert_eq!(schedule.total_delay(), Duration::ZERO);
}
