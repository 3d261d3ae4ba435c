//! Dilemma Tournament - competitive fitness through round-robin play
//!
//! This crate runs the full built-in catalog against itself:
//! - All-pairs pairing generation (self-play excluded)
//! - Independent, optionally parallel match execution
//! - Cumulative scoring and deterministic ranking

mod config;
mod tournament;

pub use config::TournamentConfig;
pub use tournament::{run_tournament, Standing, TournamentResult};
