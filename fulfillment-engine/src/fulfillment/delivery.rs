//! Delivery request flow
//!
//! Requests are raised against `built` orders and advance monotonically:
//! `pending → approved | rejected`, `approved → in_progress`,
//! `in_progress → completed`. Raising a request also appends a
//! `delivery_request` entry to the order's communication log and fans out
//! a notification (both best-effort).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use validator::Validate;

use shared::models::{
    Communication, CommunicationKind, DeliveryRequest, DeliveryRequestCreate,
    DeliveryRequestPatch, DeliveryStatus, NotificationCreate, NotificationKind,
    NotificationPriority, OrderStatus, UserProfile,
};

use crate::core::{EngineError, EngineResult};
use crate::services::{Notifier, notify_quiet};
use crate::store::RecordStore;

pub struct DeliveryService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl DeliveryService {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Raise a delivery request against a built order.
    pub async fn request_delivery(
        &self,
        payload: DeliveryRequestCreate,
        user: &UserProfile,
        now: DateTime<Utc>,
    ) -> EngineResult<DeliveryRequest> {
        payload.validate()?;

        let order = self.store.get_order(&payload.order_id).await?;
        if order.status != OrderStatus::Built {
            return Err(EngineError::invalid_transition(
                order.status,
                "delivery_requested",
            ));
        }

        let request = self
            .store
            .create_delivery_request(DeliveryRequest {
                id: None,
                order_id: payload.order_id,
                pickup_address: payload.pickup_address,
                delivery_address: payload.delivery_address,
                contact_name: payload.contact_name,
                contact_phone: payload.contact_phone,
                preferred_date: payload.preferred_date,
                special_instructions: payload.special_instructions,
                status: DeliveryStatus::Pending,
                user_id: user.id.clone(),
                created_at: None,
                updated_at: Some(now),
            })
            .await?;
        info!(order_number = %order.order_number, "delivery requested");

        // Best-effort side records; the request itself already landed.
        let sender = user
            .display_name
            .clone()
            .unwrap_or_else(|| user.email.clone());
        let log_entry = self
            .store
            .create_communication(Communication {
                id: None,
                order_id: request.order_id.clone(),
                sender,
                message: format!("Delivery requested for {}", order.order_number),
                kind: CommunicationKind::DeliveryRequest,
                user_id: user.id.clone(),
                created_at: None,
            })
            .await;
        if let Err(err) = log_entry {
            warn!(order_number = %order.order_number, error = %err, "failed to log delivery request");
        }

        notify_quiet(
            self.notifier.as_ref(),
            NotificationCreate {
                user_id: order.user_id.clone(),
                order_id: order.id.clone(),
                title: "Delivery request".to_string(),
                message: format!("Delivery requested for {}", order.order_number),
                kind: NotificationKind::DeliveryRequest,
                priority: NotificationPriority::Normal,
            },
        )
        .await;

        Ok(request)
    }

    /// Advance a request one step along its lifecycle.
    pub async fn advance(
        &self,
        request_id: &str,
        target: DeliveryStatus,
        now: DateTime<Utc>,
    ) -> EngineResult<DeliveryRequest> {
        let request = self.store.get_delivery_request(request_id).await?;

        if !request.status.can_advance(target) {
            return Err(EngineError::invalid_transition(request.status, target));
        }

        let updated = self
            .store
            .update_delivery_request(
                request_id,
                DeliveryRequestPatch {
                    status: Some(target),
                    updated_at: Some(now),
                },
            )
            .await?;
        info!(
            order_id = %updated.order_id,
            from = %request.status,
            to = %target,
            "delivery request advanced"
        );

        notify_quiet(
            self.notifier.as_ref(),
            NotificationCreate {
                user_id: updated.user_id.clone(),
                order_id: Some(updated.order_id.clone()),
                title: "Delivery request".to_string(),
                message: format!("Delivery request moved to {}", target),
                kind: NotificationKind::DeliveryRequest,
                priority: NotificationPriority::Normal,
            },
        )
        .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StoreNotifier;
    use crate::store::{MemoryStore, Query};
    use chrono::NaiveDate;
    use shared::models::{Order, Role, VehicleSpec};

    fn make_user() -> UserProfile {
        UserProfile {
            id: "broker-1".to_string(),
            email: "broker@example.com".to_string(),
            display_name: Some("Broker One".to_string()),
            role: Role::Broker,
        }
    }

    async fn seed_order(store: &MemoryStore, status: OrderStatus) -> String {
        let order = store
            .create_order(Order {
                id: None,
                order_number: "ORD-7".to_string(),
                customer_name: "Jo Fleet".to_string(),
                customer_email: "jo@example.com".to_string(),
                vehicle: VehicleSpec {
                    model: "X5".to_string(),
                    trim: "M Sport".to_string(),
                    color: "Black".to_string(),
                },
                order_value: 61_500.0,
                status,
                vin: Some("WBA12345".to_string()),
                order_date: Utc::now(),
                build_date: None,
                delivery_date: None,
                current_location: None,
                user_id: "sales-1".to_string(),
                created_at: None,
                updated_at: None,
            })
            .await
            .unwrap();
        order.id.unwrap()
    }

    fn make_payload(order_id: &str) -> DeliveryRequestCreate {
        DeliveryRequestCreate {
            order_id: order_id.to_string(),
            pickup_address: "1 Plant Way".to_string(),
            delivery_address: "2 Fleet Street".to_string(),
            contact_name: "Jo Fleet".to_string(),
            contact_phone: "07000 000000".to_string(),
            preferred_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            special_instructions: None,
        }
    }

    fn service(store: Arc<MemoryStore>) -> DeliveryService {
        DeliveryService::new(store.clone(), Arc::new(StoreNotifier::new(store)))
    }

    #[tokio::test]
    async fn test_request_against_built_order() {
        let store = Arc::new(MemoryStore::new());
        let order_id = seed_order(&store, OrderStatus::Built).await;

        let request = service(store.clone())
            .request_delivery(make_payload(&order_id), &make_user(), Utc::now())
            .await
            .unwrap();
        assert_eq!(request.status, DeliveryStatus::Pending);

        // the request is logged against the order
        let log = store
            .list_communications(&Query::new().filter("order_id", &order_id))
            .await
            .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].kind, CommunicationKind::DeliveryRequest);
        assert_eq!(log[0].sender, "Broker One");
    }

    #[tokio::test]
    async fn test_request_against_non_built_order_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let order_id = seed_order(&store, OrderStatus::InProduction).await;

        let err = service(store)
            .request_delivery(make_payload(&order_id), &make_user(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_advance_walks_the_full_sequence() {
        let store = Arc::new(MemoryStore::new());
        let order_id = seed_order(&store, OrderStatus::Built).await;
        let svc = service(store);

        let request = svc
            .request_delivery(make_payload(&order_id), &make_user(), Utc::now())
            .await
            .unwrap();
        let id = request.id.as_deref().unwrap().to_string();

        for target in [
            DeliveryStatus::Approved,
            DeliveryStatus::InProgress,
            DeliveryStatus::Completed,
        ] {
            let updated = svc.advance(&id, target, Utc::now()).await.unwrap();
            assert_eq!(updated.status, target);
        }

        // completed is terminal
        let err = svc
            .advance(&id, DeliveryStatus::Completed, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_advance_refuses_skips() {
        let store = Arc::new(MemoryStore::new());
        let order_id = seed_order(&store, OrderStatus::Built).await;
        let svc = service(store);

        let request = svc
            .request_delivery(make_payload(&order_id), &make_user(), Utc::now())
            .await
            .unwrap();
        let err = svc
            .advance(
                request.id.as_deref().unwrap(),
                DeliveryStatus::InProgress,
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }
}
