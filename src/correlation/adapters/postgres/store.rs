//! `PostgreSQL` store implementation for correlation records.

use super::{
    models::{EvaluationRow, NewEvaluationRow, NewTaskRow, TaskRow},
    schema::{BOOTSTRAP_STATEMENTS, evaluation_records, task_records},
};
use crate::correlation::{
    domain::{
        CorrelationKey, EvaluationRecord, EvaluationRecordId, PersistedEvaluationData,
        PersistedTaskData, Round, TaskRecord, TaskRecordId,
    },
    ports::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by correlation adapters.
pub type CorrelationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed correlation store.
#[derive(Debug, Clone)]
pub struct PostgresCorrelationStore {
    pool: CorrelationPgPool,
}

impl PostgresCorrelationStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CorrelationPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str) -> CorrelationStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(CorrelationStoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the correlation tables and indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::Persistence`] when any statement
    /// fails.
    pub async fn bootstrap_schema(&self) -> CorrelationStoreResult<()> {
        self.run_blocking(|connection| {
            for statement in BOOTSTRAP_STATEMENTS {
                diesel::sql_query(*statement)
                    .execute(connection)
                    .map_err(CorrelationStoreError::persistence)?;
            }
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> CorrelationStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CorrelationStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CorrelationStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CorrelationStoreError::persistence)?
    }
}

#[async_trait]
impl CorrelationStore for PostgresCorrelationStore {
    async fn record_task(&self, task: &TaskRecord) -> CorrelationStoreResult<()> {
        let new_row = to_new_task_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_records::table)
                .values(&new_row)
                .execute(connection)
                .map_err(CorrelationStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_task(&self, key: &CorrelationKey) -> CorrelationStoreResult<TaskRecord> {
        let lookup_key = key.clone();
        self.run_blocking(move |connection| {
            let round = i64::from(lookup_key.round().value());
            let row = task_records::table
                .filter(task_records::requester.eq(lookup_key.requester()))
                .filter(task_records::task.eq(lookup_key.task()))
                .filter(task_records::round.eq(round))
                .filter(task_records::nonce.eq(lookup_key.nonce()))
                .order(task_records::seq.desc())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(CorrelationStoreError::persistence)?;
            match row {
                Some(found) => row_to_task(found),
                None => Err(CorrelationStoreError::NotFound(lookup_key)),
            }
        })
        .await
    }

    async fn count_tasks(&self, key: &CorrelationKey) -> CorrelationStoreResult<usize> {
        let lookup_key = key.clone();
        self.run_blocking(move |connection| {
            let round = i64::from(lookup_key.round().value());
            let count: i64 = task_records::table
                .filter(task_records::requester.eq(lookup_key.requester()))
                .filter(task_records::task.eq(lookup_key.task()))
                .filter(task_records::round.eq(round))
                .filter(task_records::nonce.eq(lookup_key.nonce()))
                .count()
                .get_result(connection)
                .map_err(CorrelationStoreError::persistence)?;
            usize::try_from(count).map_err(CorrelationStoreError::persistence)
        })
        .await
    }

    async fn record_evaluation(
        &self,
        evaluation: &EvaluationRecord,
    ) -> CorrelationStoreResult<()> {
        let new_row = to_new_evaluation_row(evaluation);
        self.run_blocking(move |connection| {
            diesel::insert_into(evaluation_records::table)
                .values(&new_row)
                .execute(connection)
                .map_err(CorrelationStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_evaluations(
        &self,
        key: &CorrelationKey,
    ) -> CorrelationStoreResult<Vec<EvaluationRecord>> {
        let lookup_key = key.clone();
        self.run_blocking(move |connection| {
            let round = i64::from(lookup_key.round().value());
            let rows = evaluation_records::table
                .filter(evaluation_records::requester.eq(lookup_key.requester()))
                .filter(evaluation_records::task.eq(lookup_key.task()))
                .filter(evaluation_records::round.eq(round))
                .filter(evaluation_records::nonce.eq(lookup_key.nonce()))
                .order(evaluation_records::seq.asc())
                .select(EvaluationRow::as_select())
                .load::<EvaluationRow>(connection)
                .map_err(CorrelationStoreError::persistence)?;
            rows.into_iter().map(row_to_evaluation).collect()
        })
        .await
    }
}

fn to_new_task_row(task: &TaskRecord) -> NewTaskRow {
    let key = task.key();
    NewTaskRow {
        id: task.id().into_inner(),
        requester: key.requester().to_owned(),
        task: key.task().to_owned(),
        round: i64::from(key.round().value()),
        nonce: key.nonce().to_owned(),
        brief: task.brief().to_owned(),
        attachments: Value::Array(task.attachments().to_vec()),
        callback_url: task.callback_url().map(ToOwned::to_owned),
        recorded_at: task.recorded_at(),
    }
}

fn to_new_evaluation_row(evaluation: &EvaluationRecord) -> NewEvaluationRow {
    let key = evaluation.key();
    NewEvaluationRow {
        id: evaluation.id().into_inner(),
        requester: key.requester().to_owned(),
        task: key.task().to_owned(),
        round: i64::from(key.round().value()),
        nonce: key.nonce().to_owned(),
        repo_url: evaluation.repo_url().map(ToOwned::to_owned),
        commit_sha: evaluation.commit_sha().map(ToOwned::to_owned),
        pages_url: evaluation.pages_url().map(ToOwned::to_owned),
        recorded_at: evaluation.recorded_at(),
    }
}

fn row_to_task(row: TaskRow) -> CorrelationStoreResult<TaskRecord> {
    let TaskRow {
        id,
        requester,
        task,
        round,
        nonce,
        brief,
        attachments,
        callback_url,
        recorded_at,
    } = row;

    let round_value = Round::from_persisted(round).map_err(CorrelationStoreError::persistence)?;
    let attachment_list = match attachments {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };

    Ok(TaskRecord::from_persisted(PersistedTaskData {
        id: TaskRecordId::from_uuid(id),
        key: CorrelationKey::new(requester, task, round_value, nonce),
        brief,
        attachments: attachment_list,
        callback_url,
        recorded_at,
    }))
}

fn row_to_evaluation(row: EvaluationRow) -> CorrelationStoreResult<EvaluationRecord> {
    let EvaluationRow {
        id,
        requester,
        task,
        round,
        nonce,
        repo_url,
        commit_sha,
        pages_url,
        recorded_at,
    } = row;

    let round_value = Round::from_persisted(round).map_err(CorrelationStoreError::persistence)?;

    Ok(EvaluationRecord::from_persisted(PersistedEvaluationData {
        id: EvaluationRecordId::from_uuid(id),
        key: CorrelationKey::new(requester, task, round_value, nonce),
        repo_url,
        commit_sha,
        pages_url,
        recorded_at,
    }))
}
