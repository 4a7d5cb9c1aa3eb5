//! Diesel row models for correlation persistence.

use super::schema::{evaluation_records, task_records};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Requester identity.
    pub requester: String,
    /// Task identifier.
    pub task: String,
    /// Submission round.
    pub round: i64,
    /// Submission nonce.
    pub nonce: String,
    /// Free-text brief.
    pub brief: String,
    /// Attachment references.
    pub attachments: Value,
    /// Optional callback URL.
    pub callback_url: Option<String>,
    /// Record timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_records)]
pub struct NewTaskRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Requester identity.
    pub requester: String,
    /// Task identifier.
    pub task: String,
    /// Submission round.
    pub round: i64,
    /// Submission nonce.
    pub nonce: String,
    /// Free-text brief.
    pub brief: String,
    /// Attachment references.
    pub attachments: Value,
    /// Optional callback URL.
    pub callback_url: Option<String>,
    /// Record timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Query result row for evaluation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = evaluation_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EvaluationRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Requester identity.
    pub requester: String,
    /// Task identifier.
    pub task: String,
    /// Submission round.
    pub round: i64,
    /// Submission nonce.
    pub nonce: String,
    /// Reported repository URL.
    pub repo_url: Option<String>,
    /// Reported commit identifier.
    pub commit_sha: Option<String>,
    /// Reported published-site URL.
    pub pages_url: Option<String>,
    /// Record timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for evaluation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = evaluation_records)]
pub struct NewEvaluationRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Requester identity.
    pub requester: String,
    /// Task identifier.
    pub task: String,
    /// Submission round.
    pub round: i64,
    /// Submission nonce.
    pub nonce: String,
    /// Reported repository URL.
    pub repo_url: Option<String>,
    /// Reported commit identifier.
    pub commit_sha: Option<String>,
    /// Reported published-site URL.
    pub pages_url: Option<String>,
    /// Record timestamp.
    pub recorded_at: DateTime<Utc>,
}
