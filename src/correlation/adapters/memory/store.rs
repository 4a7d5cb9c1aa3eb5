//! In-memory correlation store for tests and single-process runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::correlation::{
    domain::{CorrelationKey, EvaluationRecord, TaskRecord},
    ports::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult},
};

/// Thread-safe append-only in-memory store.
///
/// Vector position is the insertion sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorrelationStore {
    state: Arc<RwLock<InMemoryCorrelationState>>,
}

#[derive(Debug, Default)]
struct InMemoryCorrelationState {
    tasks: Vec<TaskRecord>,
    evaluations: Vec<EvaluationRecord>,
}

impl InMemoryCorrelationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every task record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when the lock is
    /// poisoned.
    pub fn all_tasks(&self) -> CorrelationStoreResult<Vec<TaskRecord>> {
        Ok(self.read()?.tasks.clone())
    }

    /// Returns every evaluation record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when the lock is
    /// poisoned.
    pub fn all_evaluations(&self) -> CorrelationStoreResult<Vec<EvaluationRecord>> {
        Ok(self.read()?.evaluations.clone())
    }

    fn read(&self) -> CorrelationStoreResult<RwLockReadGuard<'_, InMemoryCorrelationState>> {
        self.state.read().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> CorrelationStoreResult<RwLockWriteGuard<'_, InMemoryCorrelationState>> {
        self.state.write().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl CorrelationStore for InMemoryCorrelationStore {
    async fn record_task(&self, task: &TaskRecord) -> CorrelationStoreResult<()> {
        self.write()?.tasks.push(task.clone());
        Ok(())
    }

    async fn find_task(&self, key: &CorrelationKey) -> CorrelationStoreResult<TaskRecord> {
        let state = self.read()?;
        state
            .tasks
            .iter()
            .rev()
            .find(|task| task.key() == key)
            .cloned()
            .ok_or_else(|| CorrelationStoreError::NotFound(key.clone()))
    }

    async fn count_tasks(&self, key: &CorrelationKey) -> CorrelationStoreResult<usize> {
        let state = self.read()?;
        Ok(state.tasks.iter().filter(|task| task.key() == key).count())
    }

    async fn record_evaluation(
        &self,
        evaluation: &EvaluationRecord,
    ) -> CorrelationStoreResult<()> {
        self.write()?.evaluations.push(evaluation.clone());
        Ok(())
    }

    async fn find_evaluations(
        &self,
        key: &CorrelationKey,
    ) -> CorrelationStoreResult<Vec<EvaluationRecord>> {
        let state = self.read()?;
        Ok(state
            .evaluations
            .iter()
            .filter(|evaluation| evaluation.key() == key)
            .cloned()
            .collect())
    }
}
