//! In-memory record store
//!
//! `DashMap`-backed implementation used by tests and development. Mimics
//! the remote store's contract: ids and `created_at` are assigned on
//! create, `update` is atomic per record (the patch is applied under the
//! map's per-key lock), and single-record integrity rules reject writes a
//! real store would refuse:
//!
//! - a stock vehicle moves to `reserved` only from `available`;
//! - an order moves to `confirmed` only from `pending`;
//! - a notification's read flag never flips back to unread.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use shared::models::{
    Communication, DeliveryRequest, DeliveryRequestPatch, Notification, NotificationPatch, Order,
    OrderPatch, OrderStatus, StockStatus, StockVehicle, StockVehiclePatch,
};

use super::{Query, RecordStore, SortDirection, StoreError, StoreResult};

/// In-memory record store
#[derive(Default)]
pub struct MemoryStore {
    orders: DashMap<String, Order>,
    stock: DashMap<String, StockVehicle>,
    delivery_requests: DashMap<String, DeliveryRequest>,
    communications: DashMap<String, Communication>,
    notifications: DashMap<String, Notification>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Field-equality match against the record's serialized form.
fn record_matches<T: Serialize>(record: &T, filters: &[(String, Value)]) -> bool {
    if filters.is_empty() {
        return true;
    }
    let value = serde_json::to_value(record).unwrap_or(Value::Null);
    filters
        .iter()
        .all(|(field, want)| value.get(field) == Some(want))
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        // RFC 3339 strings carry variable sub-second precision, so
        // timestamps must compare chronologically, not lexically.
        (Value::String(x), Value::String(y)) => match (
            chrono::DateTime::parse_from_rfc3339(x),
            chrono::DateTime::parse_from_rfc3339(y),
        ) {
            (Ok(ts_a), Ok(ts_b)) => ts_a.cmp(&ts_b),
            _ => x.cmp(y),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn run_query<T: Clone + Serialize>(map: &DashMap<String, T>, query: &Query) -> Vec<T> {
    let mut records: Vec<T> = map
        .iter()
        .filter(|entry| record_matches(entry.value(), query.filters()))
        .map(|entry| entry.value().clone())
        .collect();

    if let Some((field, direction)) = query.ordering() {
        let mut keyed: Vec<(Value, T)> = records
            .into_iter()
            .map(|r| {
                let key = serde_json::to_value(&r)
                    .ok()
                    .and_then(|v| v.get(field.as_str()).cloned())
                    .unwrap_or(Value::Null);
                (key, r)
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| match direction {
            SortDirection::Asc => compare_values(a, b),
            SortDirection::Desc => compare_values(b, a),
        });
        records = keyed.into_iter().map(|(_, r)| r).collect();
    }

    if let Some(limit) = query.limit_value() {
        records.truncate(limit);
    }

    records
}

fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_orders(&self, query: &Query) -> StoreResult<Vec<Order>> {
        Ok(run_query(&self.orders, query))
    }

    async fn create_order(&self, mut order: Order) -> StoreResult<Order> {
        let id = mint_id();
        order.id = Some(id.clone());
        order.created_at = Some(Utc::now());
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn update_order(&self, id: &str, patch: OrderPatch) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))?;
        let order = entry.value_mut();

        if patch.status == Some(OrderStatus::Confirmed) && order.status != OrderStatus::Pending {
            return Err(StoreError::Conflict(format!(
                "order {} is {}, not pending",
                id, order.status
            )));
        }

        if let Some(status) = patch.status {
            order.status = status;
        }
        if let Some(vin) = patch.vin {
            order.vin = Some(vin);
        }
        if let Some(build_date) = patch.build_date {
            order.build_date = Some(build_date);
        }
        if let Some(delivery_date) = patch.delivery_date {
            order.delivery_date = Some(delivery_date);
        }
        if let Some(location) = patch.current_location {
            order.current_location = Some(location);
        }
        if let Some(updated_at) = patch.updated_at {
            order.updated_at = Some(updated_at);
        }

        Ok(order.clone())
    }

    async fn list_stock_vehicles(&self, query: &Query) -> StoreResult<Vec<StockVehicle>> {
        Ok(run_query(&self.stock, query))
    }

    async fn create_stock_vehicle(&self, mut vehicle: StockVehicle) -> StoreResult<StockVehicle> {
        let id = mint_id();
        vehicle.id = Some(id.clone());
        vehicle.created_at = Some(Utc::now());
        self.stock.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update_stock_vehicle(
        &self,
        id: &str,
        patch: StockVehiclePatch,
    ) -> StoreResult<StockVehicle> {
        let mut entry = self
            .stock
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("stock vehicle {}", id)))?;
        let vehicle = entry.value_mut();

        // The reserved edge is claimed under this per-key lock, so of two
        // concurrent reservations exactly one observes `available`.
        if patch.status == Some(StockStatus::Reserved) && vehicle.status != StockStatus::Available
        {
            return Err(StoreError::Conflict(format!(
                "stock vehicle {} already {:?}",
                id, vehicle.status
            )));
        }

        if let Some(status) = patch.status {
            vehicle.status = status;
        }
        if let Some(location) = patch.location {
            vehicle.location = location;
        }
        if let Some(price) = patch.price {
            vehicle.price = price;
        }
        if let Some(updated_at) = patch.updated_at {
            vehicle.updated_at = Some(updated_at);
        }

        Ok(vehicle.clone())
    }

    async fn list_delivery_requests(&self, query: &Query) -> StoreResult<Vec<DeliveryRequest>> {
        Ok(run_query(&self.delivery_requests, query))
    }

    async fn create_delivery_request(
        &self,
        mut request: DeliveryRequest,
    ) -> StoreResult<DeliveryRequest> {
        let id = mint_id();
        request.id = Some(id.clone());
        request.created_at = Some(Utc::now());
        self.delivery_requests.insert(id, request.clone());
        Ok(request)
    }

    async fn update_delivery_request(
        &self,
        id: &str,
        patch: DeliveryRequestPatch,
    ) -> StoreResult<DeliveryRequest> {
        let mut entry = self
            .delivery_requests
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("delivery request {}", id)))?;
        let request = entry.value_mut();

        if let Some(status) = patch.status {
            request.status = status;
        }
        if let Some(updated_at) = patch.updated_at {
            request.updated_at = Some(updated_at);
        }

        Ok(request.clone())
    }

    async fn list_communications(&self, query: &Query) -> StoreResult<Vec<Communication>> {
        Ok(run_query(&self.communications, query))
    }

    async fn create_communication(&self, mut entry: Communication) -> StoreResult<Communication> {
        let id = mint_id();
        entry.id = Some(id.clone());
        entry.created_at = Some(Utc::now());
        self.communications.insert(id, entry.clone());
        Ok(entry)
    }

    async fn list_notifications(&self, query: &Query) -> StoreResult<Vec<Notification>> {
        Ok(run_query(&self.notifications, query))
    }

    async fn create_notification(
        &self,
        mut notification: Notification,
    ) -> StoreResult<Notification> {
        let id = mint_id();
        notification.id = Some(id.clone());
        notification.created_at = Some(Utc::now());
        self.notifications.insert(id, notification.clone());
        Ok(notification)
    }

    async fn update_notification(
        &self,
        id: &str,
        patch: NotificationPatch,
    ) -> StoreResult<Notification> {
        let mut entry = self
            .notifications
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("notification {}", id)))?;
        let notification = entry.value_mut();

        if patch.is_read == Some(false) && notification.is_read {
            return Err(StoreError::Conflict(format!(
                "notification {} read flag is monotonic",
                id
            )));
        }

        if let Some(is_read) = patch.is_read {
            notification.is_read = is_read;
        }

        Ok(notification.clone())
    }
}
