//! Generator port.

use crate::generation::domain::{GeneratedSite, GenerationRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Builds a deliverable for a submission.
#[async_trait]
pub trait SiteGenerator: Send + Sync {
    /// Generates the deliverable described by `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the deliverable could not be
    /// produced. No partial result is reported.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedSite, GenerationError>;
}

/// Errors returned by generator implementations.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Rendering the deliverable content failed.
    #[error("render failed: {0}")]
    Render(String),

    /// Writing the deliverable failed.
    #[error("write failed: {0}")]
    Io(Arc<std::io::Error>),

    /// Any other generator-specific failure.
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
