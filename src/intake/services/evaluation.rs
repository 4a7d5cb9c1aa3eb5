//! Evaluation intake: correlate, then record.

use crate::correlation::{
    domain::{CorrelationKey, EvaluationRecord, EvaluationReport},
    ports::{CorrelationStore, CorrelationStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Service-level errors for evaluation intake.
#[derive(Debug, Clone, Error)]
pub enum EvaluationError {
    /// No task record shares the report's correlation key.
    #[error("no matching task")]
    NoMatchingTask(CorrelationKey),

    /// The store failed while looking up or appending.
    #[error(transparent)]
    Store(CorrelationStoreError),
}

impl From<CorrelationStoreError> for EvaluationError {
    fn from(err: CorrelationStoreError) -> Self {
        match err {
            CorrelationStoreError::NotFound(key) => Self::NoMatchingTask(key),
            other @ CorrelationStoreError::Persistence(_) => Self::Store(other),
        }
    }
}

/// Result type for evaluation service operations.
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Accepts evaluation reports for previously submitted tasks.
pub struct EvaluationService<S, C>
where
    S: CorrelationStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> EvaluationService<S, C>
where
    S: CorrelationStore,
    C: Clock + Send + Sync,
{
    /// Creates an evaluation service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Records `report` against the task sharing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::NoMatchingTask`] without persisting
    /// anything when no task record matches, and [`EvaluationError::Store`]
    /// when the store fails.
    #[instrument(skip(self, key, report), fields(task = %key.task(), round = %key.round()))]
    pub async fn receive(
        &self,
        key: CorrelationKey,
        report: EvaluationReport,
    ) -> EvaluationResult<EvaluationRecord> {
        let task = self
            .store
            .find_task(&key)
            .await
            .inspect_err(|err| match err {
                CorrelationStoreError::NotFound(_) => warn!("evaluation not correlated"),
                CorrelationStoreError::Persistence(_) => {
                    warn!(error = %err, "task lookup failed");
                }
            })?;

        let evaluation = EvaluationRecord::new(key, report, &*self.clock);
        self.store.record_evaluation(&evaluation).await?;
        info!(record = %evaluation.id(), task_record = %task.id(), "evaluation recorded");
        Ok(evaluation)
    }
}
