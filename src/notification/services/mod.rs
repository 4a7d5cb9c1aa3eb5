//! Application services for callback delivery.

mod notifier;

pub use notifier::{CallbackNotifier, DeliveryReceipt, NotificationError};
