//! Axum routes for submission and evaluation intake.

use crate::{
    correlation::{
        domain::{CorrelationKey, EvaluationReport, Round},
        ports::CorrelationStore,
    },
    generation::ports::SiteGenerator,
    intake::services::{
        EvaluationError, EvaluationService, SubmissionError, SubmissionOutcome, SubmissionRequest,
        SubmissionService,
    },
    notification::ports::CallbackTransport,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mockable::Clock;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state.
pub struct IntakeState<S, G, T, C>
where
    S: CorrelationStore,
    G: SiteGenerator,
    T: CallbackTransport,
    C: Clock + Send + Sync,
{
    submissions: Arc<SubmissionService<S, G, T, C>>,
    evaluations: Arc<EvaluationService<S, C>>,
}

impl<S, G, T, C> IntakeState<S, G, T, C>
where
    S: CorrelationStore,
    G: SiteGenerator,
    T: CallbackTransport,
    C: Clock + Send + Sync,
{
    /// Bundles the services behind the routes.
    #[must_use]
    pub fn new(
        submissions: SubmissionService<S, G, T, C>,
        evaluations: EvaluationService<S, C>,
    ) -> Self {
        Self {
            submissions: Arc::new(submissions),
            evaluations: Arc::new(evaluations),
        }
    }
}

impl<S, G, T, C> Clone for IntakeState<S, G, T, C>
where
    S: CorrelationStore,
    G: SiteGenerator,
    T: CallbackTransport,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            submissions: Arc::clone(&self.submissions),
            evaluations: Arc::clone(&self.evaluations),
        }
    }
}

/// Builds the intake router.
///
/// Routes:
///
/// - `POST /api-endpoint` accepts a task submission
/// - `POST /evaluation` accepts an evaluation report
/// - `GET /health` answers liveness probes
#[must_use]
pub fn router<S, G, T, C>(state: IntakeState<S, G, T, C>) -> Router
where
    S: CorrelationStore + 'static,
    G: SiteGenerator + 'static,
    T: CallbackTransport + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/api-endpoint", post(submit::<S, G, T, C>))
        .route("/evaluation", post(receive_evaluation::<S, G, T, C>))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SubmissionBody {
    email: Option<String>,
    secret: Option<String>,
    task: Option<String>,
    round: Option<u32>,
    nonce: Option<String>,
    brief: Option<String>,
    attachments: Option<Vec<Value>>,
    evaluation_url: Option<String>,
}

impl SubmissionBody {
    fn into_request(self) -> SubmissionRequest {
        let key = CorrelationKey::new(
            self.email.unwrap_or_default(),
            self.task.unwrap_or_default(),
            Round::new(self.round.unwrap_or_default()),
            self.nonce.unwrap_or_default(),
        );
        let mut request = SubmissionRequest::new(key, self.brief.unwrap_or_default())
            .with_attachments(self.attachments.unwrap_or_default());
        if let Some(secret) = self.secret {
            request = request.with_secret(secret);
        }
        if let Some(url) = self.evaluation_url {
            request = request.with_callback_url(url);
        }
        request
    }
}

#[derive(Debug, Deserialize)]
struct EvaluationBody {
    email: Option<String>,
    task: Option<String>,
    round: Option<u32>,
    nonce: Option<String>,
    repo_url: Option<String>,
    commit_sha: Option<String>,
    pages_url: Option<String>,
}

impl EvaluationBody {
    fn into_parts(self) -> (CorrelationKey, EvaluationReport) {
        let key = CorrelationKey::new(
            self.email.unwrap_or_default(),
            self.task.unwrap_or_default(),
            Round::new(self.round.unwrap_or_default()),
            self.nonce.unwrap_or_default(),
        );
        let mut report = EvaluationReport::new();
        if let Some(repo_url) = self.repo_url {
            report = report.with_repo_url(repo_url);
        }
        if let Some(commit_sha) = self.commit_sha {
            report = report.with_commit_sha(commit_sha);
        }
        if let Some(pages_url) = self.pages_url {
            report = report.with_pages_url(pages_url);
        }
        (key, report)
    }
}

async fn submit<S, G, T, C>(
    State(state): State<IntakeState<S, G, T, C>>,
    payload: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: CorrelationStore + 'static,
    G: SiteGenerator + 'static,
    T: CallbackTransport + 'static,
    C: Clock + Send + Sync + 'static,
{
    let body: SubmissionBody = parse_body(&payload)?;
    let outcome = state.submissions.submit(body.into_request()).await?;
    Ok(Json(submission_response(&outcome)))
}

/// Parses a JSON body regardless of the declared content type.
fn parse_body<B: DeserializeOwned>(payload: &[u8]) -> Result<B, ApiError> {
    serde_json::from_slice(payload).map_err(|err| {
        ApiError::new(StatusCode::BAD_REQUEST, format!("invalid payload: {err}"))
    })
}

fn submission_response(outcome: &SubmissionOutcome) -> Value {
    let site = outcome.site();
    outcome.warning().map_or_else(
        || {
            json!({
                "status": "ok",
                "repo_dir": site.local_path().display().to_string(),
            })
        },
        |warning| {
            json!({
                "warning": warning,
                "repo_url": site.repo_url(),
                "pages_url": site.pages_url(),
            })
        },
    )
}

async fn receive_evaluation<S, G, T, C>(
    State(state): State<IntakeState<S, G, T, C>>,
    payload: Bytes,
) -> Result<Json<Value>, ApiError>
where
    S: CorrelationStore + 'static,
    G: SiteGenerator + 'static,
    T: CallbackTransport + 'static,
    C: Clock + Send + Sync + 'static,
{
    let body: EvaluationBody = parse_body(&payload)?;
    let (key, report) = body.into_parts();
    state.evaluations.receive(key, report).await?;
    Ok(Json(json!({ "status": "received" })))
}

/// Error response rendered as `{"error": <message>}`.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        let status = match &err {
            SubmissionError::InvalidSecret => StatusCode::BAD_REQUEST,
            SubmissionError::Generation(_) | SubmissionError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        let status = match &err {
            EvaluationError::NoMatchingTask(_) => StatusCode::BAD_REQUEST,
            EvaluationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}
