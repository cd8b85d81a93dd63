//! Notification fan-out
//!
//! Lifecycle and matching events enqueue notification records for the
//! affected users. Fan-out is fire-and-forget: a notifier failure is
//! logged and never rolls back the triggering write. Delivery transport
//! (push, email) is outside the engine; [`StoreNotifier`] only persists
//! the record the transport layer consumes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use shared::models::{Notification, NotificationCreate};

use crate::store::{RecordStore, StoreResult};

/// Notification sink
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: NotificationCreate) -> StoreResult<()>;
}

/// Persists notifications through the record store
pub struct StoreNotifier {
    store: Arc<dyn RecordStore>,
}

impl StoreNotifier {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Notifier for StoreNotifier {
    async fn notify(&self, notification: NotificationCreate) -> StoreResult<()> {
        self.store
            .create_notification(Notification {
                id: None,
                user_id: notification.user_id,
                order_id: notification.order_id,
                title: notification.title,
                message: notification.message,
                kind: notification.kind,
                priority: notification.priority,
                is_read: false,
                created_at: None,
            })
            .await?;
        Ok(())
    }
}

/// Drops every notification
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _notification: NotificationCreate) -> StoreResult<()> {
        Ok(())
    }
}

/// Fire-and-forget send: failures are logged, never propagated.
pub async fn notify_quiet(notifier: &dyn Notifier, notification: NotificationCreate) {
    let kind = notification.kind;
    let user_id = notification.user_id.clone();
    if let Err(err) = notifier.notify(notification).await {
        warn!(%user_id, ?kind, error = %err, "notification fan-out failed");
    }
}
