//! Port contracts for deliverable generation.

pub mod generator;

pub use generator::{GenerationError, SiteGenerator};
