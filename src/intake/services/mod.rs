//! Application services behind the HTTP endpoints.

mod evaluation;
mod submission;

pub use evaluation::{EvaluationError, EvaluationResult, EvaluationService};
pub use submission::{
    DEFAULT_BRIEF, DEFAULT_TASK, NotificationOutcome, SubmissionError, SubmissionOutcome,
    SubmissionRequest, SubmissionResult, SubmissionService,
};
