//! User Profile Model

use serde::{Deserialize, Serialize};

/// Application role, sourced from the identity provider only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Sales,
    Finance,
    Broker,
    Customer,
}

/// Current user as reported by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
}
