//! Dashboard Metrics Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the order/revenue time series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyOrderPoint {
    pub date: NaiveDate,
    pub order_count: u64,
    /// Revenue in currency unit for orders placed on that day
    pub revenue: f64,
}

/// Dashboard metrics snapshot
///
/// Recomputed from scratch on every call; no incremental state behind it.
/// All calendar bucketing (month, today, 7-day series) is on the UTC
/// calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardMetrics {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub in_production_orders: u64,
    pub delivered_orders: u64,
    /// Sum of order values across all scoped orders
    pub total_revenue: f64,
    /// Sum of order values for orders placed in the current UTC calendar month
    pub monthly_revenue: f64,
    /// `total_revenue / total_orders`, 0 when there are no orders
    pub average_order_value: f64,
    /// Count of scoped delivery requests regardless of status
    pub delivery_requests: u64,
    /// Distinct vehicle–order candidate pairs (0 when stock not supplied)
    pub stock_matches: u64,
    /// Communications whose `created_at` falls on `now`'s UTC date
    pub communications_today: u64,
    /// Exactly 7 entries, ascending, ending at `now`'s UTC date
    pub last_seven_days: Vec<DailyOrderPoint>,
}
