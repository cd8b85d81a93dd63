//! Engine core: configuration, errors, wiring

pub mod config;
pub mod error;
pub mod state;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use state::Engine;
