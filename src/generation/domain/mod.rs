//! Request and result types exchanged with site generators.

mod request;
mod site;

pub use request::{GenerationRequest, PushCredential};
pub use site::GeneratedSite;
