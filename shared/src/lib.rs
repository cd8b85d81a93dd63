//! Shared types for the fleet fulfillment workspace
//!
//! Data models shared between the fulfillment engine and any client that
//! talks to the same record store. This crate carries no I/O: the status
//! machines and descriptor matching rules live here as plain methods so
//! callers and tests can exercise them without an adapter.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Communication, CommunicationCreate, CommunicationKind, DailyOrderPoint, DashboardMetrics,
    DeliveryRequest, DeliveryRequestCreate, DeliveryRequestPatch, DeliveryStatus, Notification,
    NotificationCreate, NotificationKind, NotificationPatch, NotificationPriority, Order,
    OrderCreate, OrderPatch, OrderStatus, Role, StockStatus, StockVehicle, StockVehicleCreate,
    StockVehiclePatch, UserProfile, VehicleSpec,
};
