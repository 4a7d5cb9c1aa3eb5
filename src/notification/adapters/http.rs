//! `reqwest`-backed callback transport.

use crate::notification::{
    domain::{NotificationPayload, RetrySchedule},
    ports::{CallbackTransport, DeliveryError},
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Posts callback payloads over HTTP with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestCallbackTransport {
    client: reqwest::Client,
}

impl ReqwestCallbackTransport {
    /// Creates a transport using the default 10 second attempt timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] when the HTTP client cannot be
    /// initialised (for example, no TLS backend is available).
    pub fn new() -> Result<Self, DeliveryError> {
        Self::with_timeout(RetrySchedule::ATTEMPT_TIMEOUT)
    }

    /// Creates a transport with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] when the HTTP client cannot be
    /// initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CallbackTransport for ReqwestCallbackTransport {
    async fn post_json(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|err| map_send_error(&err))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status {
                status: status.as_u16(),
            })
        }
    }
}

fn map_send_error(err: &reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        DeliveryError::Timeout
    } else {
        DeliveryError::Transport(err.to_string())
    }
}
