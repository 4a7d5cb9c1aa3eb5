//! Domain model for callback notification.

mod payload;
mod schedule;

pub use payload::NotificationPayload;
pub use schedule::RetrySchedule;
