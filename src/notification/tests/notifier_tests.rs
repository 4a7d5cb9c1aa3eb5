//! Retry ladder tests for the callback notifier, run on paused tokio time.

use crate::correlation::domain::{CorrelationKey, Round};
use crate::notification::{
    domain::{NotificationPayload, RetrySchedule},
    ports::{CallbackTransport, DeliveryError},
    services::{CallbackNotifier, NotificationError},
};
use async_trait::async_trait;
use mockall::{Sequence, mock};
use rstest::{fixture, rstest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

mock! {
    Transport {}

    #[async_trait]
    impl CallbackTransport for Transport {
        async fn post_json(
            &self,
            url: &str,
            payload: &NotificationPayload,
        ) -> Result<(), DeliveryError>;
    }
}

const CALLBACK_URL: &str = "https://eval.example/notify";

#[fixture]
fn payload() -> NotificationPayload {
    let key = CorrelationKey::new("a@x.com", "t1", Round::new(1), "n1");
    NotificationPayload::new(&key, "https://example/repo")
        .with_commit_sha(Some("abc123".to_owned()))
        .with_pages_url(Some("https://example/pages/".to_owned()))
}

fn failing_until(success_on: usize) -> MockTransport {
    let mut transport = MockTransport::new();
    let mut calls = 0;
    transport
        .expect_post_json()
        .withf(|url, _| url == CALLBACK_URL)
        .returning(move |_, _| {
            calls += 1;
            if calls >= success_on {
                Ok(())
            } else {
                Err(DeliveryError::Status { status: 503 })
            }
        });
    transport
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn first_attempt_success_returns_without_sleeping(payload: NotificationPayload) {
    let notifier = CallbackNotifier::new(Arc::new(failing_until(1)));
    let started = Instant::now();

    let receipt = notifier
        .deliver(CALLBACK_URL, &payload)
        .await
        .expect("delivery should succeed");

    assert_eq!(receipt.attempts(), 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn success_on_fourth_attempt_waits_through_three_delays(payload: NotificationPayload) {
    let notifier = CallbackNotifier::new(Arc::new(failing_until(4)));
    let started = Instant::now();

    let receipt = notifier
        .deliver(CALLBACK_URL, &payload)
        .await
        .expect("delivery should succeed on the last attempt");

    assert_eq!(receipt.attempts(), 4);
    assert!(started.elapsed() >= Duration::from_secs(7));
    assert!(started.elapsed() < Duration::from_secs(15));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn always_failing_endpoint_exhausts_after_four_attempts(payload: NotificationPayload) {
    let mut transport = MockTransport::new();
    let mut sequence = Sequence::new();
    transport
        .expect_post_json()
        .times(3)
        .in_sequence(&mut sequence)
        .returning(|_, _| Err(DeliveryError::Timeout));
    transport
        .expect_post_json()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Err(DeliveryError::Transport("connection refused".to_owned())));
    let notifier = CallbackNotifier::new(Arc::new(transport));
    let started = Instant::now();

    let result = notifier.deliver(CALLBACK_URL, &payload).await;

    assert_eq!(
        result,
        Err(NotificationError::Exhausted {
            attempts: 4,
            last_error: DeliveryError::Transport("connection refused".to_owned()),
        })
    );
    assert!(started.elapsed() >= Duration::from_secs(15));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn custom_schedule_bounds_attempts(payload: NotificationPayload) {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(2)
        .returning(|_, _| Err(DeliveryError::Status { status: 500 }));
    let schedule = RetrySchedule::new(vec![Duration::from_millis(10), Duration::from_millis(20)]);
    let notifier = CallbackNotifier::with_schedule(Arc::new(transport), schedule);

    let result = notifier.deliver(CALLBACK_URL, &payload).await;

    let error = result.expect_err("delivery should fail");
    assert_eq!(
        error.last_error(),
        Some(&DeliveryError::Status { status: 500 })
    );
    assert_eq!(
        error.to_string(),
        "delivery failed after 2 attempts: callback endpoint returned HTTP 500"
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn empty_schedule_never_calls_transport(payload: NotificationPayload) {
    let mut transport = MockTransport::new();
    transport.expect_post_json().never();
    let notifier =
        CallbackNotifier::with_schedule(Arc::new(transport), RetrySchedule::new(Vec::new()));

    let result = notifier.deliver(CALLBACK_URL, &payload).await;

    assert_eq!(result, Err(NotificationError::EmptySchedule));
}
