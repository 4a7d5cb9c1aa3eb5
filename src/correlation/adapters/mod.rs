//! Adapter implementations for correlation persistence.

pub mod memory;
pub mod postgres;
