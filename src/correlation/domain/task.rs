//! Task record appended once per accepted submission.

use super::{CorrelationKey, TaskRecordId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Submission data captured before it becomes a task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSubmission {
    key: CorrelationKey,
    brief: String,
    attachments: Vec<Value>,
    callback_url: Option<String>,
}

impl TaskSubmission {
    /// Creates a submission with an empty attachment list and no callback.
    #[must_use]
    pub fn new(key: CorrelationKey, brief: impl Into<String>) -> Self {
        Self {
            key,
            brief: brief.into(),
            attachments: Vec::new(),
            callback_url: None,
        }
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Value>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Sets the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }
}

/// Immutable record of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    id: TaskRecordId,
    key: CorrelationKey,
    brief: String,
    attachments: Vec<Value>,
    callback_url: Option<String>,
    recorded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted record identifier.
    pub id: TaskRecordId,
    /// Persisted correlation key.
    pub key: CorrelationKey,
    /// Persisted brief.
    pub brief: String,
    /// Persisted attachment references.
    pub attachments: Vec<Value>,
    /// Persisted callback URL, if any.
    pub callback_url: Option<String>,
    /// Persisted record timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Creates a new task record stamped with the clock's current time.
    #[must_use]
    pub fn new(submission: TaskSubmission, clock: &impl Clock) -> Self {
        let TaskSubmission {
            key,
            brief,
            attachments,
            callback_url,
        } = submission;
        Self {
            id: TaskRecordId::new(),
            key,
            brief,
            attachments,
            callback_url,
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs a task record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            key: data.key,
            brief: data.brief,
            attachments: data.attachments,
            callback_url: data.callback_url,
            recorded_at: data.recorded_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> TaskRecordId {
        self.id
    }

    /// Returns the correlation key.
    #[must_use]
    pub const fn key(&self) -> &CorrelationKey {
        &self.key
    }

    /// Returns the free-text brief.
    #[must_use]
    pub fn brief(&self) -> &str {
        &self.brief
    }

    /// Returns the attachment references.
    #[must_use]
    pub fn attachments(&self) -> &[Value] {
        &self.attachments
    }

    /// Returns the callback URL, if one was supplied.
    #[must_use]
    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// Returns when the record was created.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
