//! Generation loop: fitness pass, selection, snapshot
//!
//! Level 1: run_evolution / run_evolution_with_observer (orchestration)
//! Level 2: fitness_pass (phase)
//! Level 3: pairing and seeding helpers (steps)

use dilemma_core::{
    run_match, EngineError, MatchConfig, PayoffMatrix, StrategyId, CATALOG,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::population::Population;
use crate::selection::{Fitness, SelectionPolicy, SteadyState};

/// Parameters for an evolution run
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Rounds per pairwise match
    pub rounds: u32,
    /// Trembling-hand error probability, in [0, 0.5]
    pub noise: f64,
    /// Payoff matrix shared by every match
    pub payoff: PayoffMatrix,
    /// Number of generations to run
    pub generations: u32,
    /// Whether fitness matches run in parallel
    pub parallel: bool,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            noise: 0.0,
            payoff: PayoffMatrix::default(),
            generations: 50,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn new(rounds: u32, noise: f64, generations: u32) -> Self {
        Self {
            rounds,
            noise,
            generations,
            ..Default::default()
        }
    }

    pub fn with_payoff(mut self, payoff: PayoffMatrix) -> Self {
        self.payoff = payoff;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Per-match parameters for the fitness passes
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.rounds, self.noise, self.payoff)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.generations < 1 {
            return Err(EngineError::InvalidParameter(format!(
                "generations must be >= 1, got {}",
                self.generations
            )));
        }
        self.match_config().validate()
    }
}

/// Post-selection population snapshot for one generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Generation {
    /// 1-based generation index
    pub gen_number: u32,
    /// (display name, count) for every catalog entry, extinct ones included
    pub populations: Vec<(String, u32)>,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run an evolution with the steady-state reference policy.
pub fn run_evolution(
    initial: Population,
    config: &EvolutionConfig,
) -> Result<Vec<Generation>, EngineError> {
    run_evolution_with_observer(initial, config, &SteadyState, |_| true)
}

/// Run an evolution, invoking `observer` at every generation boundary.
///
/// The observer sees each snapshot as it is produced; returning `false`
/// stops the run after that generation (the host's cancellation point).
/// An uninterrupted run yields exactly `config.generations` snapshots.
pub fn run_evolution_with_observer<P, F>(
    initial: Population,
    config: &EvolutionConfig,
    policy: &P,
    mut observer: F,
) -> Result<Vec<Generation>, EngineError>
where
    P: SelectionPolicy,
    F: FnMut(&Generation) -> bool,
{
    config.validate()?;
    config.payoff.warn_if_not_strict();

    let base_seed = config.seed.unwrap_or_else(rand::random);
    tracing::debug!(
        base_seed,
        generations = config.generations,
        total = initial.total(),
        "evolution start"
    );

    let match_config = config.match_config();
    let mut population = initial;
    let mut history = Vec::with_capacity(config.generations as usize);

    for gen_number in 1..=config.generations {
        let fitness = fitness_pass(
            &population,
            &match_config,
            config.parallel,
            generation_seed(base_seed, gen_number),
        )?;
        policy.apply(&mut population, &fitness);

        let generation = Generation {
            gen_number,
            populations: population.snapshot(),
        };
        let keep_going = observer(&generation);
        history.push(generation);

        if !keep_going {
            tracing::info!(gen_number, "evolution stopped by observer");
            break;
        }
    }

    Ok(history)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// One match per unordered pair of distinct active strategies; both sides'
/// scores accumulate into that generation's fitness. Population size gates
/// participation only, never match multiplicity.
fn fitness_pass(
    population: &Population,
    match_config: &MatchConfig,
    parallel: bool,
    seed: u64,
) -> Result<Fitness, EngineError> {
    let active = population.active();
    let pairings = generate_pairings(&active);

    let play = |(index, &(a, b)): (usize, &(StrategyId, StrategyId))| {
        run_match(a, b, match_config, seed.wrapping_add(index as u64))
            .map(|result| (a, b, result))
    };

    let results: Result<Vec<_>, EngineError> = if parallel {
        pairings.par_iter().enumerate().map(play).collect()
    } else {
        pairings.iter().enumerate().map(play).collect()
    };

    let mut fitness: Fitness = [0.0; CATALOG.len()];
    for (a, b, result) in results? {
        fitness[a.index()] += result.player_score;
        fitness[b.index()] += result.opponent_score;
    }
    Ok(fitness)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Unordered pairs of distinct entries, preserving the given order
fn generate_pairings(active: &[StrategyId]) -> Vec<(StrategyId, StrategyId)> {
    let mut pairings = Vec::new();
    for i in 0..active.len() {
        for j in (i + 1)..active.len() {
            pairings.push((active[i], active[j]));
        }
    }
    pairings
}

/// Disjoint seed block per generation; a generation never runs more than
/// C(8,2) = 28 matches
fn generation_seed(base: u64, gen_number: u32) -> u64 {
    base.wrapping_add((gen_number as u64) << 10)
}
