//! Domain model for task and evaluation correlation.
//!
//! Records are immutable once constructed; the store assigns their insertion
//! order and nothing else.

mod error;
mod evaluation;
mod ids;
mod key;
mod task;

pub use error::CorrelationDomainError;
pub use evaluation::{EvaluationRecord, EvaluationReport, PersistedEvaluationData};
pub use ids::{EvaluationRecordId, TaskRecordId};
pub use key::{CorrelationKey, Round};
pub use task::{PersistedTaskData, TaskRecord, TaskSubmission};
