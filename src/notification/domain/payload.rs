//! JSON body posted to callback URLs.

use crate::correlation::domain::CorrelationKey;
use serde::{Deserialize, Serialize};

/// Result of a processed submission, as delivered to the callback URL.
///
/// Absent commit or pages values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Requester identity.
    pub email: String,
    /// Task identifier.
    pub task: String,
    /// Submission round.
    pub round: u32,
    /// Submission nonce.
    pub nonce: String,
    /// Repository URL of the generated deliverable.
    pub repo_url: String,
    /// Commit identifier of the generated deliverable.
    pub commit_sha: Option<String>,
    /// Published-site URL of the generated deliverable.
    pub pages_url: Option<String>,
}

impl NotificationPayload {
    /// Builds a payload for `key` pointing at the generated repository.
    #[must_use]
    pub fn new(key: &CorrelationKey, repo_url: impl Into<String>) -> Self {
        Self {
            email: key.requester().to_owned(),
            task: key.task().to_owned(),
            round: key.round().value(),
            nonce: key.nonce().to_owned(),
            repo_url: repo_url.into(),
            commit_sha: None,
            pages_url: None,
        }
    }

    /// Sets the commit identifier.
    #[must_use]
    pub fn with_commit_sha(mut self, commit_sha: Option<String>) -> Self {
        self.commit_sha = commit_sha;
        self
    }

    /// Sets the published-site URL.
    #[must_use]
    pub fn with_pages_url(mut self, pages_url: Option<String>) -> Self {
        self.pages_url = pages_url;
        self
    }
}
