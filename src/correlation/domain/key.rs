//! Correlation key shared by task and evaluation records.

use super::CorrelationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Submission round number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round(u32);

impl Round {
    /// Creates a round from a raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates a round from a persisted signed value.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationDomainError::InvalidRound`] when the value is
    /// negative or exceeds `u32::MAX`.
    pub fn from_persisted(value: i64) -> Result<Self, CorrelationDomainError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| CorrelationDomainError::InvalidRound(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four-field tuple identifying one submission attempt.
///
/// Two records correlate only when every field matches exactly; no
/// normalisation (trimming, case folding) is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationKey {
    requester: String,
    task: String,
    round: Round,
    nonce: String,
}

impl CorrelationKey {
    /// Creates a correlation key from its components.
    #[must_use]
    pub fn new(
        requester: impl Into<String>,
        task: impl Into<String>,
        round: Round,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            requester: requester.into(),
            task: task.into(),
            round,
            nonce: nonce.into(),
        }
    }

    /// Returns the requester identity (email address).
    #[must_use]
    pub fn requester(&self) -> &str {
        &self.requester
    }

    /// Returns the task identifier.
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Returns the round number.
    #[must_use]
    pub const fn round(&self) -> Round {
        self.round
    }

    /// Returns the nonce.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/round-{}/{}",
            self.requester, self.task, self.round, self.nonce
        )
    }
}
