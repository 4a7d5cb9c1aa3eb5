//! Adapter implementations for callback delivery.

mod http;

pub use http::ReqwestCallbackTransport;
