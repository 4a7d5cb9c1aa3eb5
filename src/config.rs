//! Process configuration injected into the intake services.
//!
//! Built once at startup; request handling never reads the environment.

use crate::generation::domain::PushCredential;
use clap::Parser;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Shared-secret and credential settings for submission handling.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RelayConfig {
    expected_secret: Option<String>,
    push_credential: Option<PushCredential>,
}

impl RelayConfig {
    /// Creates a configuration with no secret check and no credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires submissions to present `secret`.
    ///
    /// An empty value disables the check.
    #[must_use]
    pub fn with_expected_secret(mut self, secret: Option<String>) -> Self {
        self.expected_secret = secret.filter(|value| !value.is_empty());
        self
    }

    /// Sets the credential passed through to the generator.
    ///
    /// An empty value is treated as absent.
    #[must_use]
    pub fn with_push_credential(mut self, token: Option<String>) -> Self {
        self.push_credential = token.and_then(PushCredential::new);
        self
    }

    /// Returns `true` when submissions must present a secret.
    #[must_use]
    pub const fn requires_secret(&self) -> bool {
        self.expected_secret.is_some()
    }

    /// Checks a provided secret against the configured one.
    ///
    /// Always `true` when no secret is configured. Otherwise the provided
    /// value must be present and byte-for-byte equal.
    #[must_use]
    pub fn accepts_secret(&self, provided: Option<&str>) -> bool {
        self.expected_secret
            .as_deref()
            .is_none_or(|expected| provided.is_some_and(|value| value.as_bytes() == expected.as_bytes()))
    }

    /// Returns the push credential, if configured.
    #[must_use]
    pub const fn push_credential(&self) -> Option<&PushCredential> {
        self.push_credential.as_ref()
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("requires_secret", &self.requires_secret())
            .field("push_credential", &self.push_credential)
            .finish()
    }
}

/// Process settings read from the command line and environment.
#[derive(Clone, Parser)]
#[command(
    name = "relay_server",
    version,
    about = "Webhook relay for task submissions and evaluations"
)]
pub struct ServerSettings {
    /// Address the HTTP API listens on.
    #[arg(long, env = "RELAY_LISTEN", default_value = "0.0.0.0:5000")]
    pub listen: SocketAddr,

    /// `PostgreSQL` connection URL. Records are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory generated sites are written to.
    #[arg(long, env = "RELAY_OUTPUT_DIR", default_value = "generated_sites")]
    pub output_dir: PathBuf,

    /// Public base URL the output directory is served from.
    #[arg(long, env = "RELAY_SITE_BASE_URL")]
    pub site_base_url: Option<String>,

    /// Shared secret submissions must present.
    #[arg(long, env = "EXPECTED_SECRET", hide_env_values = true)]
    pub expected_secret: Option<String>,

    /// Source-control token passed to the generator.
    #[arg(long = "push-token", env = "GH_TOKEN", hide_env_values = true)]
    pub push_token: Option<String>,
}

impl ServerSettings {
    /// Builds the handler configuration from these settings.
    #[must_use]
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig::new()
            .with_expected_secret(self.expected_secret.clone())
            .with_push_credential(self.push_token.clone())
    }

    /// Returns the database URL when one is configured and non-empty.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns the site base URL when one is configured and non-empty.
    #[must_use]
    pub fn site_base_url(&self) -> Option<&str> {
        self.site_base_url.as_deref().filter(|url| !url.is_empty())
    }
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("listen", &self.listen)
            .field("database", &self.database_url().map(|_| "***"))
            .field("output_dir", &self.output_dir)
            .field("site_base_url", &self.site_base_url)
            .field("relay", &self.relay_config())
            .finish()
    }
}
