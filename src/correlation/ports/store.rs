//! Store port for appending and correlating task and evaluation records.

use crate::correlation::domain::{CorrelationKey, EvaluationRecord, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for correlation store operations.
pub type CorrelationStoreResult<T> = Result<T, CorrelationStoreError>;

/// Append-only persistence contract for task and evaluation records.
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Appends a task record.
    ///
    /// Records sharing a correlation key are all kept; no uniqueness is
    /// enforced.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when storage is
    /// unavailable.
    async fn record_task(&self, task: &TaskRecord) -> CorrelationStoreResult<()>;

    /// Finds the task record for a correlation key.
    ///
    /// When several records share the key, the most recently inserted one is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::NotFound`] when no record matches.
    async fn find_task(&self, key: &CorrelationKey) -> CorrelationStoreResult<TaskRecord>;

    /// Returns how many task records share a correlation key.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when storage is
    /// unavailable.
    async fn count_tasks(&self, key: &CorrelationKey) -> CorrelationStoreResult<usize>;

    /// Appends an evaluation record.
    ///
    /// The caller is responsible for confirming a matching task exists.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when storage is
    /// unavailable.
    async fn record_evaluation(&self, evaluation: &EvaluationRecord)
    -> CorrelationStoreResult<()>;

    /// Returns all evaluation records for a correlation key in insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when storage is
    /// unavailable.
    async fn find_evaluations(
        &self,
        key: &CorrelationKey,
    ) -> CorrelationStoreResult<Vec<EvaluationRecord>>;
}

/// Errors returned by correlation store implementations.
#[derive(Debug, Clone, Error)]
pub enum CorrelationStoreError {
    /// No task record matches the correlation key.
    #[error("no task recorded for {0}")]
    NotFound(CorrelationKey),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CorrelationStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
