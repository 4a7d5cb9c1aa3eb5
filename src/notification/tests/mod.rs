//! Unit tests for callback notification.

mod http_transport_tests;
mod notifier_tests;
mod schedule_tests;
