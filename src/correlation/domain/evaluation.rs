//! Evaluation record appended once per correlated evaluation report.

use super::{CorrelationKey, EvaluationRecordId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Result fields reported by an evaluator for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    repo_url: Option<String>,
    commit_sha: Option<String>,
    pages_url: Option<String>,
}

impl EvaluationReport {
    /// Creates a report with no result fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the repository URL.
    #[must_use]
    pub fn with_repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = Some(repo_url.into());
        self
    }

    /// Sets the commit identifier.
    #[must_use]
    pub fn with_commit_sha(mut self, commit_sha: impl Into<String>) -> Self {
        self.commit_sha = Some(commit_sha.into());
        self
    }

    /// Sets the published-site URL.
    #[must_use]
    pub fn with_pages_url(mut self, pages_url: impl Into<String>) -> Self {
        self.pages_url = Some(pages_url.into());
        self
    }
}

/// Immutable record of one received evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    id: EvaluationRecordId,
    key: CorrelationKey,
    repo_url: Option<String>,
    commit_sha: Option<String>,
    pages_url: Option<String>,
    recorded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted evaluation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEvaluationData {
    /// Persisted record identifier.
    pub id: EvaluationRecordId,
    /// Persisted correlation key.
    pub key: CorrelationKey,
    /// Persisted repository URL.
    pub repo_url: Option<String>,
    /// Persisted commit identifier.
    pub commit_sha: Option<String>,
    /// Persisted published-site URL.
    pub pages_url: Option<String>,
    /// Persisted record timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl EvaluationRecord {
    /// Creates a new evaluation record stamped with the clock's current time.
    ///
    /// Callers must have confirmed that a task record with the same key
    /// exists before persisting the result.
    #[must_use]
    pub fn new(key: CorrelationKey, report: EvaluationReport, clock: &impl Clock) -> Self {
        Self {
            id: EvaluationRecordId::new(),
            key,
            repo_url: report.repo_url,
            commit_sha: report.commit_sha,
            pages_url: report.pages_url,
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs an evaluation record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEvaluationData) -> Self {
        Self {
            id: data.id,
            key: data.key,
            repo_url: data.repo_url,
            commit_sha: data.commit_sha,
            pages_url: data.pages_url,
            recorded_at: data.recorded_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> EvaluationRecordId {
        self.id
    }

    /// Returns the correlation key.
    #[must_use]
    pub const fn key(&self) -> &CorrelationKey {
        &self.key
    }

    /// Returns the repository URL.
    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    /// Returns the commit identifier.
    #[must_use]
    pub fn commit_sha(&self) -> Option<&str> {
        self.commit_sha.as_deref()
    }

    /// Returns the published-site URL.
    #[must_use]
    pub fn pages_url(&self) -> Option<&str> {
        self.pages_url.as_deref()
    }

    /// Returns when the record was created.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
