//! Correlation store for submitted tasks and received evaluations.
//!
//! Every submission is appended as a task record keyed by its correlation
//! key (requester, task, round, nonce). Evaluation reports are only accepted
//! when a task record with the identical key already exists. Both tables are
//! append-only. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
