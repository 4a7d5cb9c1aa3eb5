//! Transport port for a single callback delivery attempt.

use crate::notification::domain::NotificationPayload;
use async_trait::async_trait;
use thiserror::Error;

/// Performs one delivery attempt; retries are the caller's concern.
#[async_trait]
pub trait CallbackTransport: Send + Sync {
    /// Posts `payload` as JSON to `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the request cannot be sent, times
    /// out, or the endpoint answers with a non-success status.
    async fn post_json(&self, url: &str, payload: &NotificationPayload)
    -> Result<(), DeliveryError>;
}

/// Reasons a single delivery attempt failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The request did not complete within the per-attempt timeout.
    #[error("callback request timed out")]
    Timeout,

    /// The endpoint answered with a non-2xx status.
    #[error("callback endpoint returned HTTP {status}")]
    Status {
        /// Status code returned by the endpoint.
        status: u16,
    },

    /// The request could not be sent (connection, DNS, invalid URL).
    #[error("callback request failed: {0}")]
    Transport(String),
}
