//! Port contracts for callback delivery.

pub mod transport;

pub use transport::{CallbackTransport, DeliveryError};
