//! Order fulfillment domain
//!
//! The three coupled pieces of domain logic behind the dashboard:
//!
//! - **lifecycle**: the order status state machine and its controller
//! - **matcher**: stock-to-order matching and the reservation transaction
//! - **metrics**: dashboard counts, sums and the 7-day time series
//!
//! plus the supporting record flows (stock intake, delivery requests,
//! the append-only communication log). Matching mutates order and stock
//! records; the state machine and the aggregator both read them.

pub mod communications;
pub mod delivery;
pub mod lifecycle;
pub mod matcher;
pub mod metrics;
pub mod stock;

pub use communications::CommunicationLog;
pub use delivery::DeliveryService;
pub use lifecycle::LifecycleController;
pub use matcher::{Reservation, StockMatcher, candidate_pair_count, find_candidates};
pub use metrics::{MetricsInputs, compute_metrics};
pub use stock::StockService;
