//! `PostgreSQL` adapters for correlation persistence.

mod models;
mod schema;
mod store;

pub use store::{CorrelationPgPool, PostgresCorrelationStore};
