//! Notification read-flag service
//!
//! The read flag flips false→true only; marking an already-read
//! notification again is a no-op, never an error.

use std::sync::Arc;

use tracing::debug;

use shared::models::{Notification, NotificationPatch};

use crate::core::EngineResult;
use crate::store::{Query, RecordStore};

pub struct NotificationService {
    store: Arc<dyn RecordStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Mark one notification as read. Idempotent.
    pub async fn mark_read(&self, notification_id: &str) -> EngineResult<Notification> {
        let notification = self.store.get_notification(notification_id).await?;
        if notification.is_read {
            return Ok(notification);
        }

        let updated = self
            .store
            .update_notification(notification_id, NotificationPatch { is_read: Some(true) })
            .await?;
        Ok(updated)
    }

    /// Mark every unread notification for `user_id` as read.
    ///
    /// Returns how many flags flipped.
    pub async fn mark_all_read(&self, user_id: &str) -> EngineResult<usize> {
        let unread = self
            .store
            .list_notifications(
                &Query::new()
                    .filter("user_id", user_id)
                    .filter("is_read", false),
            )
            .await?;

        let mut flipped = 0;
        for notification in unread {
            let Some(id) = notification.id.as_deref() else {
                continue;
            };
            self.store
                .update_notification(id, NotificationPatch { is_read: Some(true) })
                .await?;
            flipped += 1;
        }

        debug!(%user_id, flipped, "marked notifications read");
        Ok(flipped)
    }
}
