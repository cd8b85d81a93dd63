//! Order Lifecycle Controller
//!
//! Validates and applies status transitions on an order and records
//! timestamps. The transition rules themselves live on
//! [`OrderStatus`](shared::models::OrderStatus); this controller re-reads
//! the order through the adapter, applies the single-record write, and
//! fans out an `order_update` notification (fire-and-forget).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use validator::Validate;

use shared::models::{
    NotificationCreate, NotificationKind, NotificationPriority, Order, OrderCreate, OrderPatch,
    OrderStatus, UserProfile,
};

use crate::core::{EngineError, EngineResult};
use crate::services::{Notifier, notify_quiet};
use crate::store::RecordStore;

pub struct LifecycleController {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    order_number_prefix: String,
}

impl LifecycleController {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        order_number_prefix: String,
    ) -> Self {
        Self {
            store,
            notifier,
            order_number_prefix,
        }
    }

    /// Create a new order in `pending` with a minted order number.
    pub async fn create_order(
        &self,
        payload: OrderCreate,
        user: &UserProfile,
        now: DateTime<Utc>,
    ) -> EngineResult<Order> {
        payload.validate()?;

        let order = Order {
            id: None,
            order_number: format!("{}-{}", self.order_number_prefix, now.timestamp_millis()),
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            vehicle: payload.vehicle,
            order_value: payload.order_value,
            status: OrderStatus::Pending,
            vin: None,
            order_date: payload.order_date,
            build_date: None,
            delivery_date: None,
            current_location: None,
            user_id: user.id.clone(),
            created_at: None,
            updated_at: Some(now),
        };

        let created = self.store.create_order(order).await?;
        info!(order_number = %created.order_number, "order created");
        Ok(created)
    }

    /// Apply a status transition.
    ///
    /// Fails with `InvalidTransition` unless `target` is the immediate
    /// successor of the current status, or `cancelled` from a non-terminal
    /// status. `confirmed` additionally requires a populated `vin`: that
    /// edge is reachable only through the stock matcher, which writes the
    /// vin as part of the reservation.
    pub async fn transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        now: DateTime<Utc>,
    ) -> EngineResult<Order> {
        let order = self.store.get_order(order_id).await?;

        if !order.status.can_transition(target) {
            return Err(EngineError::invalid_transition(order.status, target));
        }
        if target == OrderStatus::Confirmed && order.vin.is_none() {
            return Err(EngineError::invalid_transition(order.status, target));
        }

        let mut patch = OrderPatch {
            status: Some(target),
            updated_at: Some(now),
            ..Default::default()
        };
        // Milestone timestamps ride along with the transition write.
        match target {
            OrderStatus::InProduction => patch.build_date = Some(now),
            OrderStatus::Delivered => patch.delivery_date = Some(now),
            _ => {}
        }

        let updated = self.store.update_order(order_id, patch).await?;
        info!(
            order_number = %updated.order_number,
            from = %order.status,
            to = %target,
            "order transitioned"
        );

        notify_quiet(
            self.notifier.as_ref(),
            NotificationCreate {
                user_id: updated.user_id.clone(),
                order_id: updated.id.clone(),
                title: "Order update".to_string(),
                message: format!("Order {} moved to {}", updated.order_number, target),
                kind: NotificationKind::OrderUpdate,
                priority: if target == OrderStatus::Cancelled {
                    NotificationPriority::High
                } else {
                    NotificationPriority::Normal
                },
            },
        )
        .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{NullNotifier, StoreNotifier};
    use crate::store::{MemoryStore, Query, StoreResult};
    use async_trait::async_trait;
    use shared::models::{NotificationCreate, Role, VehicleSpec};

    fn make_user() -> UserProfile {
        UserProfile {
            id: "user-1".to_string(),
            email: "sales@example.com".to_string(),
            display_name: None,
            role: Role::Sales,
        }
    }

    fn make_payload() -> OrderCreate {
        OrderCreate {
            customer_name: "Jo Fleet".to_string(),
            customer_email: "jo@example.com".to_string(),
            vehicle: VehicleSpec {
                model: "X5".to_string(),
                trim: "M Sport".to_string(),
                color: "Black".to_string(),
            },
            order_value: 61_500.0,
            order_date: Utc::now(),
        }
    }

    fn controller(store: Arc<MemoryStore>) -> LifecycleController {
        LifecycleController::new(
            store.clone(),
            Arc::new(StoreNotifier::new(store)),
            "ORD".to_string(),
        )
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _n: NotificationCreate) -> StoreResult<()> {
            Err(crate::store::StoreError::Unavailable(anyhow::anyhow!(
                "notifier down"
            )))
        }
    }

    #[tokio::test]
    async fn test_create_order_mints_number_and_starts_pending() {
        let store = Arc::new(MemoryStore::new());
        let ctl = controller(store);
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.vin.is_none());
    }

    #[tokio::test]
    async fn test_create_order_rejects_bad_email() {
        let store = Arc::new(MemoryStore::new());
        let ctl = controller(store);
        let mut payload = make_payload();
        payload.customer_email = "not-an-email".to_string();
        let err = ctl
            .create_order(payload, &make_user(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_transition_rejects_skips() {
        let store = Arc::new(MemoryStore::new());
        let ctl = controller(store);
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();

        let err = ctl
            .transition(
                order.id.as_deref().unwrap(),
                OrderStatus::InProduction,
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_transition_rejects_confirmed_without_vin() {
        let store = Arc::new(MemoryStore::new());
        let ctl = controller(store);
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();

        let err = ctl
            .transition(
                order.id.as_deref().unwrap(),
                OrderStatus::Confirmed,
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_cancel_from_non_terminal_and_never_from_terminal() {
        let store = Arc::new(MemoryStore::new());
        let ctl = controller(store);
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();
        let id = order.id.as_deref().unwrap().to_string();

        let cancelled = ctl
            .transition(&id, OrderStatus::Cancelled, Utc::now())
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let err = ctl
            .transition(&id, OrderStatus::Cancelled, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_transition_enqueues_order_update_notification() {
        let store = Arc::new(MemoryStore::new());
        let ctl = controller(store.clone());
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();

        ctl.transition(order.id.as_deref().unwrap(), OrderStatus::Cancelled, Utc::now())
            .await
            .unwrap();

        let notifications = store
            .list_notifications(&Query::new().filter("user_id", "user-1"))
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::OrderUpdate);
        assert!(!notifications[0].is_read);
    }

    #[tokio::test]
    async fn test_notifier_failure_never_rolls_back_the_transition() {
        let store = Arc::new(MemoryStore::new());
        let ctl = LifecycleController::new(
            store.clone(),
            Arc::new(FailingNotifier),
            "ORD".to_string(),
        );
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();

        let updated = ctl
            .transition(order.id.as_deref().unwrap(), OrderStatus::Cancelled, Utc::now())
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_notifications_can_be_disabled() {
        let store = Arc::new(MemoryStore::new());
        let ctl =
            LifecycleController::new(store.clone(), Arc::new(NullNotifier), "ORD".to_string());
        let order = ctl
            .create_order(make_payload(), &make_user(), Utc::now())
            .await
            .unwrap();

        ctl.transition(order.id.as_deref().unwrap(), OrderStatus::Cancelled, Utc::now())
            .await
            .unwrap();

        let notifications = store.list_notifications(&Query::new()).await.unwrap();
        assert!(notifications.is_empty());
    }
}
