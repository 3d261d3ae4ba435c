//! Match engine - one bilateral iterated match
//!
//! The round loop keeps the intended/realized distinction explicit: each
//! strategy's intended action passes through an independent trembling-hand
//! flip, and only the realized action enters the histories, the scoring,
//! and the round record. Strategies therefore react to what actually
//! happened, not to unobservable intent.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Round};
use crate::error::EngineError;
use crate::payoff::PayoffMatrix;
use crate::strategy::StrategyId;

/// Parameters shared by every round of a match
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of rounds to play
    pub rounds: u32,
    /// Trembling-hand error probability, in [0, 0.5]
    pub noise: f64,
    /// Payoff matrix for every round
    pub payoff: PayoffMatrix,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            noise: 0.0,
            payoff: PayoffMatrix::default(),
        }
    }
}

impl MatchConfig {
    pub fn new(rounds: u32, noise: f64, payoff: PayoffMatrix) -> Self {
        Self {
            rounds,
            noise,
            payoff,
        }
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_payoff(mut self, payoff: PayoffMatrix) -> Self {
        self.payoff = payoff;
        self
    }

    /// Reject out-of-range parameters before any simulation work
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rounds < 1 {
            return Err(EngineError::InvalidParameter(format!(
                "rounds must be >= 1, got {}",
                self.rounds
            )));
        }
        if !self.noise.is_finite() || !(0.0..=0.5).contains(&self.noise) {
            return Err(EngineError::InvalidParameter(format!(
                "noise must be within [0, 0.5], got {}",
                self.noise
            )));
        }
        self.payoff.validate()
    }
}

/// Outcome of a single match, immutable once produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_name: String,
    pub opponent_name: String,
    /// Realized action pairs, one per round, player-major
    pub rounds: Vec<Round>,
    pub player_score: f64,
    pub opponent_score: f64,
}

/// Match runner owning the configuration and its own RNG stream
pub struct MatchRunner {
    config: MatchConfig,
    rng: ChaCha8Rng,
}

impl MatchRunner {
    /// Create a runner with a seeded RNG stream. The config is validated
    /// here so the round loop never has to.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Restart the RNG stream
    pub fn reset_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play one full match
    pub fn run(&mut self, player: StrategyId, opponent: StrategyId) -> MatchResult {
        let rounds = self.config.rounds as usize;
        let payoff = self.config.payoff;
        let noise = self.config.noise;

        let mut player_history: Vec<Action> = Vec::with_capacity(rounds);
        let mut opponent_history: Vec<Action> = Vec::with_capacity(rounds);
        let mut realized: Vec<Round> = Vec::with_capacity(rounds);
        let mut player_score = 0.0;
        let mut opponent_score = 0.0;

        for _ in 0..rounds {
            let intended_a =
                player.decide(&player_history, &opponent_history, &payoff, &mut self.rng);
            let intended_b =
                opponent.decide(&opponent_history, &player_history, &payoff, &mut self.rng);

            // Independent flip per participant
            let a = tremble(intended_a, noise, &mut self.rng);
            let b = tremble(intended_b, noise, &mut self.rng);

            player_history.push(a);
            opponent_history.push(b);
            realized.push((a, b));

            let (score_a, score_b) = payoff.payoff(a, b);
            player_score += score_a;
            opponent_score += score_b;
        }

        MatchResult {
            player_name: player.name().to_string(),
            opponent_name: opponent.name().to_string(),
            rounds: realized,
            player_score,
            opponent_score,
        }
    }
}

/// Flip an intended action with probability `noise`
fn tremble<R: Rng>(intended: Action, noise: f64, rng: &mut R) -> Action {
    if rng.gen_bool(noise) {
        intended.flip()
    } else {
        intended
    }
}

/// Run one match with a fresh RNG stream
pub fn run_match(
    player: StrategyId,
    opponent: StrategyId,
    config: &MatchConfig,
    seed: u64,
) -> Result<MatchResult, EngineError> {
    let mut runner = MatchRunner::new(*config, seed)?;
    Ok(runner.run(player, opponent))
}

/// String-id boundary used by presentation layers.
///
/// `payoff` defaults to the classic matrix; `seed` defaults to a random one
/// (pass a seed for reproducible runs).
pub fn run_game(
    p1_id: &str,
    p2_id: &str,
    rounds: u32,
    noise: f64,
    payoff: Option<PayoffMatrix>,
    seed: Option<u64>,
) -> Result<MatchResult, EngineError> {
    let player = StrategyId::from_id(p1_id)?;
    let opponent = StrategyId::from_id(p2_id)?;
    let config = MatchConfig::new(rounds, noise, payoff.unwrap_or_default());
    config.validate()?;
    config.payoff.warn_if_not_strict();
    run_match(player, opponent, &config, seed.unwrap_or_else(rand::random))
}
