//! Shared mocks and builders for intake tests.

use crate::{
    config::RelayConfig,
    correlation::{
        adapters::memory::InMemoryCorrelationStore,
        domain::{CorrelationKey, Round},
    },
    generation::{
        domain::{GeneratedSite, GenerationRequest},
        ports::{GenerationError, SiteGenerator},
    },
    intake::services::{EvaluationService, SubmissionRequest, SubmissionService},
    notification::{
        domain::NotificationPayload,
        ports::{CallbackTransport, DeliveryError},
        services::CallbackNotifier,
    },
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

mock! {
    pub Generator {}

    #[async_trait]
    impl SiteGenerator for Generator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedSite, GenerationError>;
    }
}

mock! {
    pub Transport {}

    #[async_trait]
    impl CallbackTransport for Transport {
        async fn post_json(
            &self,
            url: &str,
            payload: &NotificationPayload,
        ) -> Result<(), DeliveryError>;
    }
}

pub(super) const CALLBACK_URL: &str = "https://eval.example/notify";
pub(super) const REPO_URL: &str = "https://example/repo";
pub(super) const PAGES_URL: &str = "https://example/pages/";
pub(super) const SECRET: &str = "s3cret";

pub(super) type TestSubmissionService =
    SubmissionService<InMemoryCorrelationStore, MockGenerator, MockTransport, DefaultClock>;
pub(super) type TestEvaluationService = EvaluationService<InMemoryCorrelationStore, DefaultClock>;

pub(super) fn sample_key() -> CorrelationKey {
    CorrelationKey::new("a@x.com", "t1", Round::new(1), "n1")
}

pub(super) fn sample_request() -> SubmissionRequest {
    SubmissionRequest::new(sample_key(), "Build a page")
}

pub(super) fn published_site() -> GeneratedSite {
    GeneratedSite::local("/srv/sites/t1")
        .with_repo_url(REPO_URL)
        .with_commit_sha("abc123")
        .with_pages_url(PAGES_URL)
}

pub(super) fn generator_returning(site: GeneratedSite) -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .returning(move |_| Ok(site.clone()));
    generator
}

pub(super) fn failing_generator() -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .returning(|_| Err(GenerationError::Render("template exploded".to_owned())));
    generator
}

pub(super) fn unused_generator() -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator.expect_generate().never();
    generator
}

/// Transport that answers 503 until the `success_on`-th call.
pub(super) fn transport_failing_until(success_on: usize) -> MockTransport {
    let mut transport = MockTransport::new();
    let mut calls = 0;
    transport.expect_post_json().returning(move |_, _| {
        calls += 1;
        if calls >= success_on {
            Ok(())
        } else {
            Err(DeliveryError::Status { status: 503 })
        }
    });
    transport
}

pub(super) fn always_failing_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport
        .expect_post_json()
        .times(4)
        .returning(|_, _| Err(DeliveryError::Status { status: 503 }));
    transport
}

pub(super) fn unused_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.expect_post_json().never();
    transport
}

pub(super) fn submission_service(
    store: &Arc<InMemoryCorrelationStore>,
    generator: MockGenerator,
    transport: MockTransport,
    config: RelayConfig,
) -> TestSubmissionService {
    SubmissionService::new(
        Arc::clone(store),
        Arc::new(generator),
        CallbackNotifier::new(Arc::new(transport)),
        Arc::new(DefaultClock),
        Arc::new(config),
    )
}

pub(super) fn evaluation_service(store: &Arc<InMemoryCorrelationStore>) -> TestEvaluationService {
    EvaluationService::new(Arc::clone(store), Arc::new(DefaultClock))
}

/// Formatted `tracing` output collected in memory.
#[derive(Clone, Default)]
pub(super) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Builds a subscriber that writes plain-text events into this buffer.
    pub(super) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || logs.clone())
            .finish()
    }

    pub(super) fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
