//! Error types for engine operations

use thiserror::Error;

/// Everything the engine can reject; validation happens before any
/// simulation work starts, and values are never silently clamped.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown strategy id: {0}")]
    UnknownStrategyId(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed payoff matrix: {0}")]
    MalformedPayoff(String),
}
