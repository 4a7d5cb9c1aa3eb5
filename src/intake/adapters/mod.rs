//! Inbound adapters for intake.

mod http;

pub use http::{IntakeState, router};
