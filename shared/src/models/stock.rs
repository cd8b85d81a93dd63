//! Stock Vehicle Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::order::VehicleSpec;

/// Physical stock vehicle status
///
/// `available → reserved` happens only through the stock matcher, atomically
/// with the matched order's `pending → confirmed` move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    Damaged,
}

/// Stock vehicle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockVehicle {
    pub id: Option<String>,
    /// Unique chassis number
    pub vin: String,
    pub vehicle: VehicleSpec,
    pub year: i32,
    /// Price in currency unit
    pub price: f64,
    pub location: String,
    pub status: StockStatus,
    /// Operator who registered the vehicle
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Register stock vehicle payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StockVehicleCreate {
    #[validate(length(min = 1, max = 100))]
    pub vin: String,
    pub vehicle: VehicleSpec,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
}

/// Partial stock vehicle update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockVehiclePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
