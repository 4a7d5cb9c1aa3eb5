//! HTTP intake for task submissions and evaluation reports.
//!
//! A submission is checked against the shared secret, turned into a
//! deliverable by the generator, appended to the correlation store and then
//! announced to the caller's callback URL. Evaluation reports are accepted
//! only for a previously recorded submission with the same correlation key.
//!
//! - Orchestration in [`services`]
//! - Axum routes in [`adapters`]

pub mod adapters;
pub mod services;

#[cfg(test)]
mod tests;
