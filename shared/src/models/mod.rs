//! Data models
//!
//! Shared between the fulfillment engine and frontend (via the record
//! store API). All IDs are store-assigned strings; all timestamps are
//! `chrono::DateTime<Utc>` serialized as RFC 3339.

pub mod communication;
pub mod delivery;
pub mod metrics;
pub mod notification;
pub mod order;
pub mod stock;
pub mod user;

// Re-exports
pub use communication::*;
pub use delivery::*;
pub use metrics::*;
pub use notification::*;
pub use order::*;
pub use stock::*;
pub use user::*;
