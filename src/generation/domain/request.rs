//! Generation input.

use serde_json::Value;
use std::fmt;

/// Token passed through to generators that publish to source control.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PushCredential(String);

impl PushCredential {
    /// Wraps a token, returning `None` for an empty value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let raw = token.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PushCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PushCredential(***)")
    }
}

/// Everything a generator needs to build one deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    task: String,
    brief: String,
    attachments: Vec<Value>,
    credential: Option<PushCredential>,
}

impl GenerationRequest {
    /// Creates a request with no attachments and no credential.
    #[must_use]
    pub fn new(task: impl Into<String>, brief: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            brief: brief.into(),
            attachments: Vec::new(),
            credential: None,
        }
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Value>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Sets the push credential.
    #[must_use]
    pub fn with_credential(mut self, credential: Option<PushCredential>) -> Self {
        self.credential = credential;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Returns the brief.
    #[must_use]
    pub fn brief(&self) -> &str {
        &self.brief
    }

    /// Returns the attachment references.
    #[must_use]
    pub fn attachments(&self) -> &[Value] {
        &self.attachments
    }

    /// Returns the push credential, if configured.
    #[must_use]
    pub const fn credential(&self) -> Option<&PushCredential> {
        self.credential.as_ref()
    }
}
