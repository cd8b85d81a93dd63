//! Communication Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Communication entry type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationKind {
    #[default]
    Note,
    StatusUpdate,
    DeliveryRequest,
    CustomerInquiry,
}

/// Append-only log entry against an order. Never mutated or deleted; the
/// store surface for communications exposes no update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Communication {
    pub id: Option<String>,
    pub order_id: String,
    pub sender: String,
    pub message: String,
    pub kind: CommunicationKind,
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Append communication payload
///
/// `sender` is derived from the acting user, not client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommunicationCreate {
    pub order_id: String,
    #[validate(length(min = 1, max = 500))]
    pub message: String,
    pub kind: CommunicationKind,
}
