//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order status
///
/// Statuses advance in strict forward order with no skipping:
/// `pending → confirmed → in_production → built → in_transit → delivered`.
/// Any non-terminal status may also move to `cancelled`. `delivered` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProduction,
    Built,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The immediate successor in the fixed forward sequence, if any.
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::InProduction),
            OrderStatus::InProduction => Some(OrderStatus::Built),
            OrderStatus::Built => Some(OrderStatus::InTransit),
            OrderStatus::InTransit => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether `target` is a legal move from this status: the immediate
    /// successor, or `cancelled` from any non-terminal status.
    pub fn can_transition(self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if target == OrderStatus::Cancelled {
            return true;
        }
        self.successor() == Some(target)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProduction => "in_production",
            OrderStatus::Built => "built",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Vehicle descriptor carried by both orders and stock vehicles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleSpec {
    pub model: String,
    pub trim: String,
    pub color: String,
}

impl VehicleSpec {
    /// Case-insensitive exact equality on all three fields.
    ///
    /// This is the only matching rule the stock matcher uses: no fuzzy
    /// matching, no partial-field matching.
    pub fn matches(&self, other: &VehicleSpec) -> bool {
        self.model.eq_ignore_ascii_case(&other.model)
            && self.trim.eq_ignore_ascii_case(&other.trim)
            && self.color.eq_ignore_ascii_case(&other.color)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// Unique display key (e.g. "ORD-1721900000000")
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle: VehicleSpec,
    /// Order value in currency unit (non-negative)
    pub order_value: f64,
    pub status: OrderStatus,
    /// Chassis number, populated by stock reservation only
    pub vin: Option<String>,
    /// Date the order was placed (drives revenue bucketing)
    pub order_date: DateTime<Utc>,
    pub build_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub current_location: Option<String>,
    /// Owning operator ID
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    pub vehicle: VehicleSpec,
    #[validate(range(min = 0.0))]
    pub order_value: f64,
    pub order_date: DateTime<Utc>,
}

/// Partial order update
///
/// Fields left as `None` are not written. The record store applies the
/// patch as a single atomic per-record write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
