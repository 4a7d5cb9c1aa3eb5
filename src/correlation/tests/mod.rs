//! Unit tests for correlation domain types and the in-memory store.
