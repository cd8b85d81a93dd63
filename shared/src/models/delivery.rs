//! Delivery Request Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Delivery request status
///
/// Advances monotonically: `pending → approved → in_progress → completed`,
/// with `pending → rejected` as the only branch. `rejected` and `completed`
/// are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
}

impl DeliveryStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Rejected | DeliveryStatus::Completed)
    }

    /// Whether `target` is a legal forward move from this status.
    pub fn can_advance(self, target: DeliveryStatus) -> bool {
        matches!(
            (self, target),
            (DeliveryStatus::Pending, DeliveryStatus::Approved)
                | (DeliveryStatus::Pending, DeliveryStatus::Rejected)
                | (DeliveryStatus::Approved, DeliveryStatus::InProgress)
                | (DeliveryStatus::InProgress, DeliveryStatus::Completed)
        )
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Approved => "approved",
            DeliveryStatus::Rejected => "rejected",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Delivery request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub id: Option<String>,
    pub order_id: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub preferred_date: NaiveDate,
    pub special_instructions: Option<String>,
    pub status: DeliveryStatus,
    /// Operator who raised the request
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create delivery request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeliveryRequestCreate {
    pub order_id: String,
    #[validate(length(min = 1, max = 500))]
    pub pickup_address: String,
    #[validate(length(min = 1, max = 500))]
    pub delivery_address: String,
    #[validate(length(min = 1, max = 200))]
    pub contact_name: String,
    #[validate(length(min = 1, max = 100))]
    pub contact_phone: String,
    pub preferred_date: NaiveDate,
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>,
}

/// Partial delivery request update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryRequestPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_moves_only() {
        assert!(DeliveryStatus::Pending.can_advance(DeliveryStatus::Approved));
        assert!(DeliveryStatus::Pending.can_advance(DeliveryStatus::Rejected));
        assert!(DeliveryStatus::Approved.can_advance(DeliveryStatus::InProgress));
        assert!(DeliveryStatus::InProgress.can_advance(DeliveryStatus::Completed));

        assert!(!DeliveryStatus::Pending.can_advance(DeliveryStatus::InProgress));
        assert!(!DeliveryStatus::Approved.can_advance(DeliveryStatus::Pending));
        assert!(!DeliveryStatus::Rejected.can_advance(DeliveryStatus::Approved));
        assert!(!DeliveryStatus::Completed.can_advance(DeliveryStatus::Completed));
    }
}
