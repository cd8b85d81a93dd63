//! Record Store Adapter
//!
//! The engine's only mutation surface. Per collection the adapter exposes
//! `list` (field-equality filters, optional ordering and limit), `create`
//! (store assigns `id` and `created_at`) and `update` (single-record
//! atomic patch). There is no multi-record transaction primitive; callers
//! that need more than one write compensate by re-validating preconditions
//! before each write (see the stock matcher).
//!
//! Communications are append-only and expose no update.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use shared::models::{
    Communication, DeliveryRequest, DeliveryRequestPatch, Notification, NotificationPatch, Order,
    OrderPatch, StockVehicle, StockVehiclePatch,
};

pub use memory::MemoryStore;

/// Adapter errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    /// A single-record integrity rule rejected the write (e.g. a stock
    /// vehicle leaving `available` for `reserved` when a concurrent writer
    /// already claimed it).
    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

/// Result type alias for adapter calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// List query: field-equality filters, optional order and limit.
///
/// Filter values are compared against the record's serialized form, so a
/// status filter takes the wire value (`"in_production"`), matching what
/// the remote store indexes.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, Value)>,
    order_by: Option<(String, SortDirection)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field-equality filter. Values that fail to serialize (never
    /// the case for the scalar keys used here) fall back to `null` and
    /// match nothing.
    pub fn filter(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.filters.push((field.into(), value));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<&(String, SortDirection)> {
        self.order_by.as_ref()
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }
}

/// Record store adapter trait
///
/// Implementations own their transport, timeouts and retries; the engine
/// propagates [`StoreError::Unavailable`] unchanged.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ── Orders ──────────────────────────────────────────────────────────
    async fn list_orders(&self, query: &Query) -> StoreResult<Vec<Order>>;
    async fn create_order(&self, order: Order) -> StoreResult<Order>;
    async fn update_order(&self, id: &str, patch: OrderPatch) -> StoreResult<Order>;

    // ── Stock vehicles ──────────────────────────────────────────────────
    async fn list_stock_vehicles(&self, query: &Query) -> StoreResult<Vec<StockVehicle>>;
    async fn create_stock_vehicle(&self, vehicle: StockVehicle) -> StoreResult<StockVehicle>;
    async fn update_stock_vehicle(
        &self,
        id: &str,
        patch: StockVehiclePatch,
    ) -> StoreResult<StockVehicle>;

    // ── Delivery requests ───────────────────────────────────────────────
    async fn list_delivery_requests(&self, query: &Query) -> StoreResult<Vec<DeliveryRequest>>;
    async fn create_delivery_request(
        &self,
        request: DeliveryRequest,
    ) -> StoreResult<DeliveryRequest>;
    async fn update_delivery_request(
        &self,
        id: &str,
        patch: DeliveryRequestPatch,
    ) -> StoreResult<DeliveryRequest>;

    // ── Communications (append-only) ────────────────────────────────────
    async fn list_communications(&self, query: &Query) -> StoreResult<Vec<Communication>>;
    async fn create_communication(&self, entry: Communication) -> StoreResult<Communication>;

    // ── Notifications ───────────────────────────────────────────────────
    async fn list_notifications(&self, query: &Query) -> StoreResult<Vec<Notification>>;
    async fn create_notification(&self, notification: Notification) -> StoreResult<Notification>;
    async fn update_notification(
        &self,
        id: &str,
        patch: NotificationPatch,
    ) -> StoreResult<Notification>;

    // ── Single-record fetch sugar over `list` ───────────────────────────

    async fn get_order(&self, id: &str) -> StoreResult<Order> {
        self.list_orders(&Query::new().filter("id", id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))
    }

    async fn get_stock_vehicle(&self, id: &str) -> StoreResult<StockVehicle> {
        self.list_stock_vehicles(&Query::new().filter("id", id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("stock vehicle {}", id)))
    }

    async fn get_delivery_request(&self, id: &str) -> StoreResult<DeliveryRequest> {
        self.list_delivery_requests(&Query::new().filter("id", id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("delivery request {}", id)))
    }

    async fn get_notification(&self, id: &str) -> StoreResult<Notification> {
        self.list_notifications(&Query::new().filter("id", id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("notification {}", id)))
    }
}
