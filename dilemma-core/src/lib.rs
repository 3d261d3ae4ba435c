//! Dilemma Core - Iterated Prisoner's Dilemma engine
//!
//! This crate provides the core simulation logic:
//! - Actions and realized per-round records
//! - The built-in strategy catalog (pure decision rules over history)
//! - Payoff matrices
//! - The match engine (round loop, trembling-hand noise, scoring)

pub mod action;
pub mod error;
pub mod game;
pub mod payoff;
pub mod strategy;

// Re-exports for convenient access
pub use action::{Action, Round};
pub use error::EngineError;
pub use game::{run_game, run_match, MatchConfig, MatchResult, MatchRunner};
pub use payoff::PayoffMatrix;
pub use strategy::{StrategyId, CATALOG};

/// Liveness probe for presentation layers
pub fn greet_engine() -> String {
    format!("Core Engine: v{} (Custom Payoff Ready)", env!("CARGO_PKG_VERSION"))
}
