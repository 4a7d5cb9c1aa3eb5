//! Callback notification with a bounded retry ladder.
//!
//! After a submission has been processed, its result is posted to the
//! caller-supplied callback URL. Delivery is best effort: a fixed number of
//! attempts separated by fixed delays, with no state persisted between
//! attempts.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Delivery orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
