//! Fleet Order Fulfillment Engine
//!
//! Domain core behind the fleet order-tracking dashboard. The engine owns
//! the order status state machine, the stock-to-order matching algorithm,
//! and the dashboard metrics aggregation; everything else (persistence,
//! authentication, UI, notification transport) sits behind narrow traits.
//!
//! # Module structure
//!
//! ```text
//! fulfillment-engine/src/
//! ├── core/          # Configuration, engine errors, wiring
//! ├── store/         # Record store adapter trait + in-memory implementation
//! ├── fulfillment/   # Lifecycle, matcher, metrics, stock, delivery, comms
//! ├── services/      # Notification fan-out and read-flag service
//! ├── auth/          # Identity provider seam
//! └── utils/         # Time bucketing, money arithmetic, logging
//! ```
//!
//! # Design
//!
//! The engine holds no state between calls. Every public operation takes
//! its inputs explicitly (including the reference `now` timestamp), reads
//! current records through the [`store::RecordStore`] adapter, applies pure
//! computation, and writes results back through the same adapter.

pub mod auth;
pub mod core;
pub mod fulfillment;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{AuthEvent, IdentityError, IdentityProvider, MockIdentity};
pub use core::{Engine, EngineConfig, EngineError, EngineResult};
pub use fulfillment::{
    CommunicationLog, DeliveryService, LifecycleController, MetricsInputs, Reservation,
    StockMatcher, StockService, candidate_pair_count, compute_metrics, find_candidates,
};
pub use services::{NotificationService, Notifier, NullNotifier, StoreNotifier};
pub use store::{MemoryStore, Query, RecordStore, SortDirection, StoreError, StoreResult};

// Re-export logger functions
pub use utils::logger::init_logger;
