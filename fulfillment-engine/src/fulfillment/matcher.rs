//! Stock Matcher
//!
//! Finds available stock vehicles whose descriptor equals a pending
//! order's descriptor (case-insensitive, all three fields) and performs
//! the reservation. Candidate listing is pure; ties are never
//! auto-resolved. The reservation call names one order and one vehicle,
//! an explicit operator choice.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use shared::models::{
    NotificationCreate, NotificationKind, NotificationPriority, Order, OrderPatch, OrderStatus,
    StockStatus, StockVehicle, StockVehiclePatch,
};

use crate::core::{EngineError, EngineResult};
use crate::services::{Notifier, notify_quiet};
use crate::store::{RecordStore, StoreError};

/// Candidate pairings: available vehicle id → pending orders with an
/// exactly-matching descriptor.
///
/// Pure and deterministic: keys are sorted by vehicle id, candidate
/// orders keep their input order, and the inputs are never mutated.
/// Vehicles not yet persisted (no id) cannot be reserved and are skipped.
pub fn find_candidates<'a>(
    stock: &'a [StockVehicle],
    orders: &'a [Order],
) -> BTreeMap<String, Vec<&'a Order>> {
    let mut candidates = BTreeMap::new();

    for vehicle in stock {
        if vehicle.status != StockStatus::Available {
            continue;
        }
        let Some(id) = vehicle.id.clone() else {
            continue;
        };
        let matching: Vec<&Order> = orders
            .iter()
            .filter(|order| {
                order.status == OrderStatus::Pending && vehicle.vehicle.matches(&order.vehicle)
            })
            .collect();
        candidates.insert(id, matching);
    }

    candidates
}

/// Number of distinct vehicle–order candidate pairs.
pub fn candidate_pair_count(stock: &[StockVehicle], orders: &[Order]) -> u64 {
    find_candidates(stock, orders)
        .values()
        .map(|orders| orders.len() as u64)
        .sum()
}

/// Outcome of a successful reservation
#[derive(Debug, Clone)]
pub struct Reservation {
    pub order: Order,
    pub stock_vehicle: StockVehicle,
}

pub struct StockMatcher {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl StockMatcher {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Reserve a stock vehicle against a pending order.
    ///
    /// Preconditions are re-validated at call time so a match computed
    /// from a stale listing is rejected rather than applied. The two
    /// writes are not atomic across records: the vehicle is claimed
    /// first (the store refuses `reserved` unless it still observes
    /// `available`, so concurrent claims lose there), then the order is
    /// confirmed and the vin recorded. If the order write fails the claim
    /// is released and the call reports `StaleMatch`; the caller re-lists
    /// candidates and retries.
    pub async fn reserve(
        &self,
        order_id: &str,
        stock_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<Reservation> {
        let order = self.store.get_order(order_id).await?;
        let vehicle = self.store.get_stock_vehicle(stock_id).await?;

        if order.status != OrderStatus::Pending {
            return Err(EngineError::StaleMatch(format!(
                "order {} is {}, not pending",
                order.order_number, order.status
            )));
        }
        if vehicle.status != StockStatus::Available {
            return Err(EngineError::StaleMatch(format!(
                "stock vehicle {} is {:?}, not available",
                vehicle.vin, vehicle.status
            )));
        }
        if !vehicle.vehicle.matches(&order.vehicle) {
            return Err(EngineError::StaleMatch(format!(
                "stock vehicle {} no longer matches order {}",
                vehicle.vin, order.order_number
            )));
        }

        let reserved = self
            .store
            .update_stock_vehicle(
                stock_id,
                StockVehiclePatch {
                    status: Some(StockStatus::Reserved),
                    updated_at: Some(now),
                    ..Default::default()
                },
            )
            .await?;

        let confirm = self
            .store
            .update_order(
                order_id,
                OrderPatch {
                    status: Some(OrderStatus::Confirmed),
                    vin: Some(reserved.vin.clone()),
                    updated_at: Some(now),
                    ..Default::default()
                },
            )
            .await;

        let order = match confirm {
            Ok(order) => order,
            Err(err) => {
                self.release_claim(stock_id, now).await;
                return Err(match err {
                    StoreError::Conflict(_) => EngineError::StaleMatch(format!(
                        "order {} was confirmed by a concurrent reservation",
                        order.order_number
                    )),
                    other => other.into(),
                });
            }
        };

        info!(
            order_number = %order.order_number,
            vin = %reserved.vin,
            "order matched to stock"
        );

        notify_quiet(
            self.notifier.as_ref(),
            NotificationCreate {
                user_id: order.user_id.clone(),
                order_id: order.id.clone(),
                title: "Stock match".to_string(),
                message: format!(
                    "Order {} reserved against vehicle {}",
                    order.order_number, reserved.vin
                ),
                kind: NotificationKind::StockMatch,
                priority: NotificationPriority::Normal,
            },
        )
        .await;

        Ok(Reservation {
            order,
            stock_vehicle: reserved,
        })
    }

    /// Best-effort release of a claimed vehicle after a failed order
    /// write. A failure here leaves the vehicle `reserved` with no
    /// confirmed order; the warning carries enough to resolve it by hand.
    async fn release_claim(&self, stock_id: &str, now: DateTime<Utc>) {
        let release = self
            .store
            .update_stock_vehicle(
                stock_id,
                StockVehiclePatch {
                    status: Some(StockStatus::Available),
                    updated_at: Some(now),
                    ..Default::default()
                },
            )
            .await;
        if let Err(err) = release {
            warn!(%stock_id, error = %err, "failed to release stock claim");
        }
    }
}
