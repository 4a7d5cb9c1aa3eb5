//! Retrying callback notifier.

use crate::notification::{
    domain::{NotificationPayload, RetrySchedule},
    ports::{CallbackTransport, DeliveryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Successful delivery details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    attempts: usize,
}

impl DeliveryReceipt {
    /// Returns the attempt number that succeeded (1-based).
    #[must_use]
    pub const fn attempts(self) -> usize {
        self.attempts
    }
}

/// Delivery failed after the whole ladder was used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// Every attempt failed.
    #[error("delivery failed after {attempts} attempts: {last_error}")]
    Exhausted {
        /// Number of attempts made.
        attempts: usize,
        /// Error from the final attempt.
        last_error: DeliveryError,
    },

    /// The retry schedule allowed no attempts.
    #[error("retry schedule allows no delivery attempts")]
    EmptySchedule,
}

impl NotificationError {
    /// Returns the error reported by the final attempt, if any was made.
    #[must_use]
    pub const fn last_error(&self) -> Option<&DeliveryError> {
        match self {
            Self::Exhausted { last_error, .. } => Some(last_error),
            Self::EmptySchedule => None,
        }
    }
}

/// Delivers payloads to callback URLs following a [`RetrySchedule`].
#[derive(Clone)]
pub struct CallbackNotifier<T>
where
    T: CallbackTransport,
{
    transport: Arc<T>,
    schedule: RetrySchedule,
}

impl<T> CallbackNotifier<T>
where
    T: CallbackTransport,
{
    /// Creates a notifier using the default four-attempt ladder.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_schedule(transport, RetrySchedule::default())
    }

    /// Creates a notifier with an explicit schedule.
    #[must_use]
    pub const fn with_schedule(transport: Arc<T>, schedule: RetrySchedule) -> Self {
        Self {
            transport,
            schedule,
        }
    }

    /// Returns the retry schedule in use.
    #[must_use]
    pub const fn schedule(&self) -> &RetrySchedule {
        &self.schedule
    }

    /// Posts `payload` to `url`, retrying on failure.
    ///
    /// Stops at the first successful attempt. After each failed attempt the
    /// scheduled delay is slept, including after the last one.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Exhausted`] carrying the final attempt's
    /// error when no attempt succeeded.
    #[instrument(skip(self, payload), fields(task = %payload.task, round = payload.round))]
    pub async fn deliver(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, NotificationError> {
        let mut last_error = None;
        let mut attempts = 0;

        for delay in self.schedule.delays() {
            attempts += 1;
            match self.transport.post_json(url, payload).await {
                Ok(()) => {
                    info!(attempts, "callback delivered");
                    return Ok(DeliveryReceipt { attempts });
                }
                Err(err) => {
                    warn!(
                        attempt = attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "callback attempt failed"
                    );
                    last_error = Some(err);
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        match last_error {
            Some(last) => {
                error!(attempts, error = %last, "callback delivery exhausted");
                Err(NotificationError::Exhausted {
                    attempts,
                    last_error: last,
                })
            }
            None => Err(NotificationError::EmptySchedule),
        }
    }
}
