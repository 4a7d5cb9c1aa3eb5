//! Diesel schema for correlation persistence.

diesel::table! {
    /// Append-only task records, one row per accepted submission.
    task_records (seq) {
        /// Insertion sequence used for most-recent tie-breaks.
        seq -> Int8,
        /// Record identifier.
        id -> Uuid,
        /// Requester identity.
        requester -> Text,
        /// Task identifier.
        task -> Text,
        /// Submission round.
        round -> Int8,
        /// Submission nonce.
        nonce -> Text,
        /// Free-text brief.
        brief -> Text,
        /// Attachment references as a JSON array.
        attachments -> Jsonb,
        /// Optional callback URL.
        callback_url -> Nullable<Text>,
        /// Record timestamp.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only evaluation records correlated to task records.
    evaluation_records (seq) {
        /// Insertion sequence.
        seq -> Int8,
        /// Record identifier.
        id -> Uuid,
        /// Requester identity.
        requester -> Text,
        /// Task identifier.
        task -> Text,
        /// Submission round.
        round -> Int8,
        /// Submission nonce.
        nonce -> Text,
        /// Reported repository URL.
        repo_url -> Nullable<Text>,
        /// Reported commit identifier.
        commit_sha -> Nullable<Text>,
        /// Reported published-site URL.
        pages_url -> Nullable<Text>,
        /// Record timestamp.
        recorded_at -> Timestamptz,
    }
}

/// Idempotent DDL applied at startup.
pub const BOOTSTRAP_STATEMENTS: &[&str] = &[
    concat!(
        "CREATE TABLE IF NOT EXISTS task_records (",
        "seq BIGSERIAL PRIMARY KEY, ",
        "id UUID NOT NULL UNIQUE, ",
        "requester TEXT NOT NULL, ",
        "task TEXT NOT NULL, ",
        "round BIGINT NOT NULL, ",
        "nonce TEXT NOT NULL, ",
        "brief TEXT NOT NULL, ",
        "attachments JSONB NOT NULL DEFAULT '[]'::jsonb, ",
        "callback_url TEXT, ",
        "recorded_at TIMESTAMPTZ NOT NULL)",
    ),
    concat!(
        "CREATE INDEX IF NOT EXISTS idx_task_records_correlation ",
        "ON task_records (requester, task, round, nonce)",
    ),
    concat!(
        "CREATE TABLE IF NOT EXISTS evaluation_records (",
        "seq BIGSERIAL PRIMARY KEY, ",
        "id UUID NOT NULL UNIQUE, ",
        "requester TEXT NOT NULL, ",
        "task TEXT NOT NULL, ",
        "round BIGINT NOT NULL, ",
        "nonce TEXT NOT NULL, ",
        "repo_url TEXT, ",
        "commit_sha TEXT, ",
        "pages_url TEXT, ",
        "recorded_at TIMESTAMPTZ NOT NULL)",
    ),
    concat!(
        "CREATE INDEX IF NOT EXISTS idx_evaluation_records_correlation ",
        "ON evaluation_records (requester, task, round, nonce)",
    ),
];
