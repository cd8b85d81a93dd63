//! Engine services: notification fan-out and read-flag management

pub mod notifications;
pub mod notifier;

pub use notifications::NotificationService;
pub use notifier::{Notifier, NullNotifier, StoreNotifier, notify_quiet};
