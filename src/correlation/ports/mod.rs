//! Port contracts for correlation persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by intake services.

pub mod store;

pub use store::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult};
