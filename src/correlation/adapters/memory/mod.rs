//! In-memory adapters for correlation persistence.

mod store;

pub use store::InMemoryCorrelationStore;
