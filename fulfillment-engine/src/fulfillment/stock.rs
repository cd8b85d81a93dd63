//! Stock intake and manual status overrides

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use validator::Validate;

use shared::models::{
    StockStatus, StockVehicle, StockVehicleCreate, StockVehiclePatch, UserProfile,
};

use crate::core::{EngineError, EngineResult};
use crate::store::{Query, RecordStore};

pub struct StockService {
    store: Arc<dyn RecordStore>,
}

impl StockService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Register a physical vehicle. VINs are unique across the stock
    /// collection; the vehicle starts `available`.
    pub async fn add_vehicle(
        &self,
        payload: StockVehicleCreate,
        user: &UserProfile,
        now: DateTime<Utc>,
    ) -> EngineResult<StockVehicle> {
        payload.validate()?;

        let existing = self
            .store
            .list_stock_vehicles(&Query::new().filter("vin", &payload.vin).limit(1))
            .await?;
        if !existing.is_empty() {
            return Err(EngineError::Validation(format!(
                "vin {} is already registered",
                payload.vin
            )));
        }

        let created = self
            .store
            .create_stock_vehicle(StockVehicle {
                id: None,
                vin: payload.vin,
                vehicle: payload.vehicle,
                year: payload.year,
                price: payload.price,
                location: payload.location,
                status: StockStatus::Available,
                user_id: user.id.clone(),
                created_at: None,
                updated_at: Some(now),
            })
            .await?;
        info!(vin = %created.vin, "stock vehicle registered");
        Ok(created)
    }

    /// Operator status override (sold, damaged, back to available).
    ///
    /// `reserved` is refused here: that edge is written only by the
    /// stock matcher, together with the order confirmation.
    pub async fn set_status(
        &self,
        stock_id: &str,
        target: StockStatus,
        now: DateTime<Utc>,
    ) -> EngineResult<StockVehicle> {
        if target == StockStatus::Reserved {
            return Err(EngineError::Validation(
                "reservation goes through the stock matcher".to_string(),
            ));
        }

        let updated = self
            .store
            .update_stock_vehicle(
                stock_id,
                StockVehiclePatch {
                    status: Some(target),
                    updated_at: Some(now),
                    ..Default::default()
                },
            )
            .await?;
        info!(vin = %updated.vin, status = ?target, "stock status updated");
        Ok(updated)
    }
}
