//! Engine configuration
//!
//! # Environment variables
//!
//! Every item can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | tracing level filter |
//! | ORDER_NUMBER_PREFIX | ORD | prefix for minted order numbers |
//! | NOTIFICATIONS_ENABLED | true | wire the store-backed notifier |

use std::env;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level passed to the tracing subscriber
    pub log_level: String,
    /// Prefix for minted order numbers (display keys)
    pub order_number_prefix: String,
    /// When false, lifecycle and matching events skip notification fan-out
    pub notifications_enabled: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset. Reads `.env` first when present.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            order_number_prefix: env::var("ORDER_NUMBER_PREFIX")
                .unwrap_or_else(|_| "ORD".to_string()),
            notifications_enabled: env::var("NOTIFICATIONS_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            order_number_prefix: "ORD".to_string(),
            notifications_enabled: true,
        }
    }
}
