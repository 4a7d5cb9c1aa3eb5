//! Submission relay: webhook intake, deliverable generation and callback
//! notification.
//!
//! The relay accepts task submissions over HTTP, generates a static-site
//! deliverable for each, appends a record of the submission and posts the
//! result to a caller-supplied callback URL with bounded retries. A second
//! endpoint accepts evaluation reports and records them against the original
//! submission.
//!
//! # Architecture
//!
//! Each module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, files)
//!
//! # Modules
//!
//! - [`config`]: Startup configuration injected into the services
//! - [`correlation`]: Append-only task and evaluation records
//! - [`generation`]: Deliverable generation collaborator
//! - [`notification`]: Callback delivery with a fixed retry ladder
//! - [`intake`]: Submission and evaluation services and HTTP routes

pub mod config;
pub mod correlation;
pub mod generation;
pub mod intake;
pub mod notification;
