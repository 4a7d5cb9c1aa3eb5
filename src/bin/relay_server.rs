//! Runs the submission relay HTTP server.
//!
//! Usage:
//!
//! ```text
//! relay_server [--listen <addr>] [--database-url <url>] [--output-dir <dir>]
//!              [--site-base-url <url>] [--expected-secret <secret>]
//!              [--push-token <token>]
//! ```
//!
//! Every flag falls back to an environment variable (`RELAY_LISTEN`,
//! `DATABASE_URL`, `RELAY_OUTPUT_DIR`, `RELAY_SITE_BASE_URL`,
//! `EXPECTED_SECRET`, `GH_TOKEN`). Without a database URL, records are kept
//! in memory for the lifetime of the process. Log verbosity follows
//! `RUST_LOG` and defaults to `info`.

use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use submission_relay::{
    config::ServerSettings,
    correlation::{
        adapters::{memory::InMemoryCorrelationStore, postgres::PostgresCorrelationStore},
        ports::CorrelationStore,
    },
    generation::adapters::LocalSiteGenerator,
    intake::{
        adapters::{IntakeState, router},
        services::{EvaluationService, SubmissionService},
    },
    notification::{adapters::ReqwestCallbackTransport, services::CallbackNotifier},
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let settings = ServerSettings::parse();
    info!(?settings, "starting relay");

    let Some(database_url) = settings.database_url().map(ToOwned::to_owned) else {
        info!("no database configured; records are kept in memory");
        return serve(&settings, InMemoryCorrelationStore::new()).await;
    };

    let store =
        tokio::task::spawn_blocking(move || PostgresCorrelationStore::connect(&database_url))
            .await??;
    store.bootstrap_schema().await?;
    info!("correlation schema ready");
    serve(&settings, store).await
}

async fn serve<S>(settings: &ServerSettings, correlation_store: S) -> Result<(), BoxError>
where
    S: CorrelationStore + 'static,
{
    let store = Arc::new(correlation_store);
    let clock = Arc::new(DefaultClock);

    let mut generator = LocalSiteGenerator::new(settings.output_dir.clone());
    if let Some(base_url) = settings.site_base_url() {
        generator = generator.with_base_url(base_url);
    }
    let notifier = CallbackNotifier::new(Arc::new(ReqwestCallbackTransport::new()?));

    let submissions = SubmissionService::new(
        Arc::clone(&store),
        Arc::new(generator),
        notifier,
        Arc::clone(&clock),
        Arc::new(settings.relay_config()),
    );
    let evaluations = EvaluationService::new(store, clock);
    let app = router(IntakeState::new(submissions, evaluations));

    let listener = TcpListener::bind(settings.listen).await?;
    info!(address = %settings.listen, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutdown requested");
}
