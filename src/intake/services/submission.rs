//! Submission orchestration: secret check, generation, record, notify.

use crate::{
    config::RelayConfig,
    correlation::{
        domain::{CorrelationKey, TaskRecord, TaskSubmission},
        ports::{CorrelationStore, CorrelationStoreError},
    },
    generation::{
        domain::{GeneratedSite, GenerationRequest},
        ports::{GenerationError, SiteGenerator},
    },
    notification::{
        domain::NotificationPayload,
        ports::CallbackTransport,
        services::{CallbackNotifier, DeliveryReceipt, NotificationError},
    },
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Task identifier handed to the generator when a submission has none.
pub const DEFAULT_TASK: &str = "task";
/// Brief handed to the generator when a submission has none.
pub const DEFAULT_BRIEF: &str = "Hello world";

/// Inbound submission as received; empty strings stand in for missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    key: CorrelationKey,
    brief: String,
    attachments: Vec<Value>,
    secret: Option<String>,
    callback_url: Option<String>,
}

impl SubmissionRequest {
    /// Creates a request with no attachments, secret or callback URL.
    #[must_use]
    pub fn new(key: CorrelationKey, brief: impl Into<String>) -> Self {
        Self {
            key,
            brief: brief.into(),
            attachments: Vec::new(),
            secret: None,
            callback_url: None,
        }
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Value>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Sets the secret presented by the caller.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Sets the URL the result is posted to.
    #[must_use]
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    /// Returns the correlation key.
    #[must_use]
    pub const fn key(&self) -> &CorrelationKey {
        &self.key
    }
}

/// What happened to the callback notification of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// No callback URL, or the generator produced no repository URL.
    Skipped,
    /// The callback endpoint accepted the payload.
    Delivered(DeliveryReceipt),
    /// Every attempt failed.
    Failed(NotificationError),
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    record: TaskRecord,
    site: GeneratedSite,
    notification: NotificationOutcome,
}

impl SubmissionOutcome {
    /// Returns the appended task record.
    #[must_use]
    pub const fn record(&self) -> &TaskRecord {
        &self.record
    }

    /// Returns the generated deliverable.
    #[must_use]
    pub const fn site(&self) -> &GeneratedSite {
        &self.site
    }

    /// Returns the notification outcome.
    #[must_use]
    pub const fn notification(&self) -> &NotificationOutcome {
        &self.notification
    }

    /// Returns the degraded-success warning when notification failed.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        let NotificationOutcome::Failed(err) = &self.notification else {
            return None;
        };
        let reason = err
            .last_error()
            .map_or_else(|| err.to_string(), ToString::to_string);
        Some(format!(
            "created repo but failed to notify evaluation_url after retries: {reason}"
        ))
    }
}

/// Service-level errors for submission handling.
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    /// The provided secret did not match the configured one.
    #[error("invalid secret")]
    InvalidSecret,

    /// The generator failed; no task was recorded.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The task record could not be appended.
    #[error(transparent)]
    Store(#[from] CorrelationStoreError),
}

/// Result type for submission service operations.
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Handles inbound task submissions.
pub struct SubmissionService<S, G, T, C>
where
    S: CorrelationStore,
    G: SiteGenerator,
    T: CallbackTransport,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    generator: Arc<G>,
    notifier: CallbackNotifier<T>,
    clock: Arc<C>,
    config: Arc<RelayConfig>,
}

impl<S, G, T, C> SubmissionService<S, G, T, C>
where
    S: CorrelationStore,
    G: SiteGenerator,
    T: CallbackTransport,
    C: Clock + Send + Sync,
{
    /// Creates a submission service.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        generator: Arc<G>,
        notifier: CallbackNotifier<T>,
        clock: Arc<C>,
        config: Arc<RelayConfig>,
    ) -> Self {
        Self {
            store,
            generator,
            notifier,
            clock,
            config,
        }
    }

    /// Processes one submission.
    ///
    /// Once generation succeeds the task record is appended regardless of
    /// how notification turns out. Notification runs inline, so this call
    /// returns only after the retry ladder finishes.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::InvalidSecret`] before any side effect when
    /// the secret check fails, [`SubmissionError::Generation`] when the
    /// generator fails, and [`SubmissionError::Store`] when the record
    /// cannot be appended.
    #[instrument(
        skip(self, request),
        fields(task = %request.key.task(), round = %request.key.round())
    )]
    pub async fn submit(&self, request: SubmissionRequest) -> SubmissionResult<SubmissionOutcome> {
        if !self.config.accepts_secret(request.secret.as_deref()) {
            warn!("submission rejected: invalid secret");
            return Err(SubmissionError::InvalidSecret);
        }

        let SubmissionRequest {
            key,
            brief,
            attachments,
            callback_url,
            ..
        } = request;

        let generation = GenerationRequest::new(
            non_empty_or(key.task(), DEFAULT_TASK),
            non_empty_or(&brief, DEFAULT_BRIEF),
        )
            .with_attachments(attachments.iter().cloned())
            .with_credential(self.config.push_credential().cloned());
        let site = self.generator.generate(&generation).await.inspect_err(|err| {
            warn!(error = %err, "generation failed");
        })?;

        let mut submission = TaskSubmission::new(key, brief).with_attachments(attachments);
        if let Some(url) = callback_url {
            submission = submission.with_callback_url(url);
        }
        let record = TaskRecord::new(submission, &*self.clock);
        self.store.record_task(&record).await?;
        info!(record = %record.id(), "task recorded");

        let notification = self.notify(&record, &site).await;
        Ok(SubmissionOutcome {
            record,
            site,
            notification,
        })
    }

    async fn notify(&self, record: &TaskRecord, site: &GeneratedSite) -> NotificationOutcome {
        let callback_url = record.callback_url().filter(|url| !url.is_empty());
        let (Some(url), Some(repo_url)) = (callback_url, site.repo_url()) else {
            debug!("notification skipped");
            return NotificationOutcome::Skipped;
        };

        let payload = NotificationPayload::new(record.key(), repo_url)
            .with_commit_sha(site.commit_sha().map(ToOwned::to_owned))
            .with_pages_url(site.pages_url().map(ToOwned::to_owned));
        match self.notifier.deliver(url, &payload).await {
            Ok(receipt) => NotificationOutcome::Delivered(receipt),
            Err(err) => NotificationOutcome::Failed(err),
        }
    }
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
