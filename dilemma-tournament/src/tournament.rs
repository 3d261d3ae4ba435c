//! Round-robin tournament over the built-in catalog
//!
//! Level 1: run_tournament (orchestration)
//! Level 2: execute_all_matches (phase)
//! Level 3: generate_pairings, compute_standings (steps)

use dilemma_core::{run_match, EngineError, MatchResult, StrategyId, CATALOG};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::TournamentConfig;

/// Standing of one strategy in the final ranking
#[derive(Clone, Debug, Serialize)]
pub struct Standing {
    /// Which strategy this is
    pub strategy: StrategyId,
    /// Display name
    pub name: String,
    /// Cumulative score across all pairwise matches
    pub score: f64,
}

/// Result of a tournament
#[derive(Clone, Debug, Serialize)]
pub struct TournamentResult {
    /// Standings sorted by score (descending); ties keep catalog order
    pub standings: Vec<Standing>,
}

impl TournamentResult {
    /// Top standing
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// (display name, cumulative score) pairs, descending
    pub fn ranking(&self) -> Vec<(String, f64)> {
        self.standings
            .iter()
            .map(|standing| (standing.name.clone(), standing.score))
            .collect()
    }

    /// Standing for a specific strategy
    pub fn standing_for(&self, strategy: StrategyId) -> Option<&Standing> {
        self.standings
            .iter()
            .find(|standing| standing.strategy == strategy)
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run one round-robin tournament over the full catalog.
///
/// Every unordered pair of distinct strategies plays exactly one match;
/// self-play is excluded. With a fixed seed the result is deterministic
/// whether matches run in parallel or not.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentResult, EngineError> {
    config.validate()?;
    config.payoff.warn_if_not_strict();

    let base_seed = config.seed.unwrap_or_else(rand::random);
    tracing::debug!(base_seed, rounds = config.rounds, noise = config.noise, "tournament start");

    let pairings = generate_pairings(&CATALOG);
    let results = execute_all_matches(&pairings, config, base_seed)?;
    let standings = compute_standings(&results);

    Ok(TournamentResult { standings })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Run every pairing's match; each pairing gets its own seed derived from
/// the call-level one, so parallel and sequential execution agree.
fn execute_all_matches(
    pairings: &[(StrategyId, StrategyId)],
    config: &TournamentConfig,
    base_seed: u64,
) -> Result<Vec<(StrategyId, StrategyId, MatchResult)>, EngineError> {
    let match_config = config.match_config();

    let play = |(index, &(a, b)): (usize, &(StrategyId, StrategyId))| {
        let seed = base_seed.wrapping_add(index as u64);
        run_match(a, b, &match_config, seed).map(|result| (a, b, result))
    };

    if config.parallel {
        pairings.par_iter().enumerate().map(play).collect()
    } else {
        pairings.iter().enumerate().map(play).collect()
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// All unordered pairs of distinct entries, in catalog order
fn generate_pairings(catalog: &[StrategyId]) -> Vec<(StrategyId, StrategyId)> {
    let mut pairings = Vec::with_capacity(catalog.len() * (catalog.len() - 1) / 2);
    for i in 0..catalog.len() {
        for j in (i + 1)..catalog.len() {
            pairings.push((catalog[i], catalog[j]));
        }
    }
    pairings
}

/// Sum both participants' scores per strategy and sort descending.
/// The sort is stable, so equal scores keep catalog order.
fn compute_standings(results: &[(StrategyId, StrategyId, MatchResult)]) -> Vec<Standing> {
    let mut scores = [0.0f64; CATALOG.len()];
    for (a, b, result) in results {
        scores[a.index()] += result.player_score;
        scores[b.index()] += result.opponent_score;
    }

    let mut standings: Vec<Standing> = CATALOG
        .iter()
        .map(|&strategy| Standing {
            strategy,
            name: strategy.name().to_string(),
            score: scores[strategy.index()],
        })
        .collect();

    standings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    standings
}
