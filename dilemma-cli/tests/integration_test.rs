//! Integration tests for the dilemma engine
//!
//! Tests the full stack: strategy catalog, match engine, tournament
//! ranking, and evolutionary dynamics working together.

use dilemma_core::{
    greet_engine, run_game, run_match, Action, MatchConfig, PayoffMatrix, StrategyId, CATALOG,
};
use dilemma_evolve::{run_evolution, EvolutionConfig, Population};
use dilemma_tournament::{run_tournament, TournamentConfig};

// ============================================================================
// MATCH ENGINE
// ============================================================================

#[test]
fn test_mutual_cooperation_baseline() {
    // always_cooperate vs always_cooperate over N rounds yields (3N, 3N)
    for rounds in [1, 10, 137] {
        let result = run_game(
            "always_cooperate",
            "always_cooperate",
            rounds,
            0.0,
            None,
            Some(1),
        )
        .unwrap();
        assert_eq!(result.player_score, 3.0 * rounds as f64);
        assert_eq!(result.opponent_score, 3.0 * rounds as f64);
    }
}

#[test]
fn test_exploitation_baseline() {
    // always_defect vs always_cooperate over N rounds yields (5N, 0)
    let result = run_game("always_defect", "always_cooperate", 64, 0.0, None, Some(1)).unwrap();
    assert_eq!(result.player_score, 320.0);
    assert_eq!(result.opponent_score, 0.0);
}

#[test]
fn test_pavlov_pair_converges_to_cooperation() {
    let result = run_game("pavlov", "pavlov", 50, 0.0, None, Some(1)).unwrap();
    // After at most one exploratory round pair both sides earn >= 3 every round
    for &(a, b) in &result.rounds[1..] {
        assert_eq!((a, b), (Action::Cooperate, Action::Cooperate));
    }
}

#[test]
fn test_custom_payoff_matrix_flows_through() {
    let payoff = PayoffMatrix::new(10.0, 6.0, 2.0, 0.0);
    let result = run_game(
        "always_cooperate",
        "always_cooperate",
        10,
        0.0,
        Some(payoff),
        Some(1),
    )
    .unwrap();
    assert_eq!(result.player_score, 60.0);
}

#[test]
fn test_noise_statistics_match_the_configured_level() {
    // With two unconditional strategies every deviation from intent is
    // observable; noise = 0.25 should flip about a quarter of all actions
    let config = MatchConfig::new(40_000, 0.25, PayoffMatrix::default());
    let result = run_match(
        StrategyId::AlwaysCooperate,
        StrategyId::AlwaysDefect,
        &config,
        99,
    )
    .unwrap();

    let player_flips = result
        .rounds
        .iter()
        .filter(|&&(a, _)| a == Action::Defect)
        .count();
    let opponent_flips = result
        .rounds
        .iter()
        .filter(|&&(_, b)| b == Action::Cooperate)
        .count();

    // 40_000 draws each at p = 0.25; allow a wide statistical margin
    assert!((9_000..=11_000).contains(&player_flips), "got {player_flips}");
    assert!(
        (9_000..=11_000).contains(&opponent_flips),
        "got {opponent_flips}"
    );
}

// ============================================================================
// TOURNAMENT
// ============================================================================

#[test]
fn test_tournament_ranking_covers_the_catalog() {
    let result = run_tournament(&TournamentConfig::new(100, 0.05).with_seed(42)).unwrap();
    let ranking = result.ranking();

    assert_eq!(ranking.len(), 8);
    for strategy in CATALOG {
        assert!(
            ranking.iter().any(|(name, _)| name == strategy.name()),
            "{} missing from ranking",
            strategy.name()
        );
    }
}

#[test]
fn test_tournament_is_reproducible_with_a_seed() {
    let config = TournamentConfig::new(80, 0.1).with_seed(7);
    let first = run_tournament(&config).unwrap();
    let second = run_tournament(&config).unwrap();
    assert_eq!(first.ranking(), second.ranking());
}

// ============================================================================
// EVOLUTION
// ============================================================================

#[test]
fn test_evolution_end_to_end() {
    let initial = Population::from_slice(&[5, 5, 5, 5, 5, 5, 5, 5]).unwrap();
    let config = EvolutionConfig::new(50, 0.05, 25).with_seed(3);
    let history = run_evolution(initial, &config).unwrap();

    assert_eq!(history.len(), 25);

    // Total population conserved in every snapshot
    for generation in &history {
        let sum: u32 = generation.populations.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, 40, "generation {}", generation.gen_number);
    }

    // Generation numbering is 1-based and dense
    for (index, generation) in history.iter().enumerate() {
        assert_eq!(generation.gen_number, index as u32 + 1);
    }
}

#[test]
fn test_evolution_extinction_is_absorbing_end_to_end() {
    // Start some strategies at zero; they must never come back
    let initial = Population::from_slice(&[4, 4, 4, 0, 4, 0, 4, 4]).unwrap();
    let history = run_evolution(initial, &EvolutionConfig::new(40, 0.2, 50).with_seed(13)).unwrap();

    for generation in &history {
        for (name, count) in &generation.populations {
            if name == "Grim Trigger" || name == "Random" {
                assert_eq!(*count, 0, "{name} resurrected in gen {}", generation.gen_number);
            }
        }
    }
}

// ============================================================================
// BOUNDARY SURFACE
// ============================================================================

#[test]
fn test_greet_engine_liveness() {
    assert!(greet_engine().starts_with("Core Engine:"));
}

#[test]
fn test_unknown_strategy_is_a_typed_error() {
    let err = run_game("always_cooperate", "tit_for_two_tats", 10, 0.0, None, Some(1)).unwrap_err();
    assert!(err.to_string().contains("unknown strategy id"));
}

#[test]
fn test_validation_errors_are_reported_not_clamped() {
    // Out-of-range noise
    assert!(run_game("random", "random", 10, 0.75, None, Some(1)).is_err());
    // Zero rounds
    assert!(run_game("random", "random", 0, 0.0, None, Some(1)).is_err());
    // Non-finite payoff
    let bad = PayoffMatrix::new(f64::INFINITY, 3.0, 1.0, 0.0);
    assert!(run_game("random", "random", 10, 0.0, Some(bad), Some(1)).is_err());
}
