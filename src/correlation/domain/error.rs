//! Error types for correlation domain validation.

use thiserror::Error;

/// Errors returned while constructing correlation values from raw input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorrelationDomainError {
    /// The round number is negative or does not fit the domain range.
    #[error("invalid round number {0}, expected a non-negative 32-bit integer")]
    InvalidRound(i64),
}
