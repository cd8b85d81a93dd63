//! Metrics Aggregator
//!
//! Pure function of the scoped order, delivery-request and communication
//! collections plus a reference `now`. Scoping (by owning user or
//! role-appropriate visibility) is the caller's filter; the aggregator
//! never reads the store and recomputes everything from scratch on each
//! call.
//!
//! Calendar policy: all bucketing ("today", the current month, the 7-day
//! series) is on the UTC calendar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use shared::models::{
    Communication, DailyOrderPoint, DashboardMetrics, DeliveryRequest, Order, OrderStatus,
    StockVehicle,
};

use crate::fulfillment::matcher::candidate_pair_count;
use crate::utils::money::{sum_amounts, to_decimal, to_f64};
use crate::utils::time::{same_utc_month, trailing_days, utc_date};

/// Days covered by the dashboard time series, `now` inclusive.
const SERIES_DAYS: u64 = 7;

/// Caller-scoped input collections
#[derive(Debug, Clone, Copy)]
pub struct MetricsInputs<'a> {
    pub orders: &'a [Order],
    pub delivery_requests: &'a [DeliveryRequest],
    pub communications: &'a [Communication],
    /// Current stock snapshot; when absent `stock_matches` stays 0.
    pub stock: Option<&'a [StockVehicle]>,
}

/// Compute the dashboard snapshot for a viewer scope.
pub fn compute_metrics(inputs: &MetricsInputs<'_>, now: DateTime<Utc>) -> DashboardMetrics {
    let orders = inputs.orders;

    let count_status = |status: OrderStatus| -> u64 {
        orders.iter().filter(|o| o.status == status).count() as u64
    };

    let total_orders = orders.len() as u64;
    let total_revenue = sum_amounts(orders.iter().map(|o| o.order_value));
    let monthly_revenue = sum_amounts(
        orders
            .iter()
            .filter(|o| same_utc_month(o.order_date, now))
            .map(|o| o.order_value),
    );
    let average_order_value = if total_orders == 0 {
        0.0
    } else {
        to_f64(total_revenue / Decimal::from(total_orders))
    };

    let today = utc_date(now);
    let communications_today = inputs
        .communications
        .iter()
        .filter(|c| c.created_at.map(utc_date) == Some(today))
        .count() as u64;

    let stock_matches = match inputs.stock {
        Some(stock) => candidate_pair_count(stock, orders),
        None => 0,
    };

    let last_seven_days = trailing_days(now, SERIES_DAYS)
        .into_iter()
        .map(|date| {
            let day_orders = orders.iter().filter(|o| utc_date(o.order_date) == date);
            let (order_count, revenue) =
                day_orders.fold((0u64, Decimal::ZERO), |(count, sum), order| {
                    (count + 1, sum + to_decimal(order.order_value))
                });
            DailyOrderPoint {
                date,
                order_count,
                revenue: to_f64(revenue),
            }
        })
        .collect();

    DashboardMetrics {
        total_orders,
        pending_orders: count_status(OrderStatus::Pending),
        in_production_orders: count_status(OrderStatus::InProduction),
        delivered_orders: count_status(OrderStatus::Delivered),
        total_revenue: to_f64(total_revenue),
        monthly_revenue: to_f64(monthly_revenue),
        average_order_value,
        delivery_requests: inputs.delivery_requests.len() as u64,
        stock_matches,
        communications_today,
        last_seven_days,
    }
}
