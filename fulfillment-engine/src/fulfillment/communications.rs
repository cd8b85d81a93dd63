//! Append-only communication log
//!
//! Entries are written once against an existing order and never mutated
//! or deleted; the store surface exposes no update for this collection.

use std::sync::Arc;

use tracing::debug;
use validator::Validate;

use shared::models::{Communication, CommunicationCreate, UserProfile};

use crate::core::EngineResult;
use crate::store::{Query, RecordStore, SortDirection};

pub struct CommunicationLog {
    store: Arc<dyn RecordStore>,
}

impl CommunicationLog {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Append an entry to an order's log. The sender is the acting user's
    /// display name, falling back to their email.
    pub async fn post(
        &self,
        payload: CommunicationCreate,
        user: &UserProfile,
    ) -> EngineResult<Communication> {
        payload.validate()?;

        // existence check only; the entry carries the order id as a
        // foreign key
        let order = self.store.get_order(&payload.order_id).await?;

        let entry = self
            .store
            .create_communication(Communication {
                id: None,
                order_id: payload.order_id,
                sender: user
                    .display_name
                    .clone()
                    .unwrap_or_else(|| user.email.clone()),
                message: payload.message,
                kind: payload.kind,
                user_id: user.id.clone(),
                created_at: None,
            })
            .await?;
        debug!(order_number = %order.order_number, kind = ?entry.kind, "communication appended");
        Ok(entry)
    }

    /// All entries for an order, oldest first.
    pub async fn for_order(&self, order_id: &str) -> EngineResult<Vec<Communication>> {
        let entries = self
            .store
            .list_communications(
                &Query::new()
                    .filter("order_id", order_id)
                    .order_by("created_at", SortDirection::Asc),
            )
            .await?;
        Ok(entries)
    }
}
