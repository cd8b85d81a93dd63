//! Unified engine error handling
//!
//! All failures are values returned to the caller, never silent:
//! - [`EngineError::InvalidTransition`]: the requested state change
//!   violates a lifecycle graph; surfaced to the operator, never retried.
//! - [`EngineError::StaleMatch`]: a reservation race was lost; the caller
//!   re-lists candidates and retries.
//! - [`EngineError::NotFound`]: a referenced id no longer exists.
//! - [`EngineError::Validation`]: the payload was rejected before any
//!   write.
//! - [`EngineError::Store`]: the record store is unavailable; propagated
//!   unchanged, the engine performs no retries or backoff of its own.

use thiserror::Error;

use crate::store::StoreError;

/// Engine error enum
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("stale match: {0}")]
    StaleMatch(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("record store unavailable: {0}")]
    Store(StoreError),
}

impl EngineError {
    pub(crate) fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        EngineError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => EngineError::NotFound(what),
            // A store-level conflict means a concurrent writer got there
            // first; at the engine surface that is a lost race.
            StoreError::Conflict(what) => EngineError::StaleMatch(what),
            other => EngineError::Store(other),
        }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::Validation(err.to_string())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;
