//! Unit tests for intake services and routes.

mod support;
