//! Configuration types for tournament play

use dilemma_core::{EngineError, MatchConfig, PayoffMatrix};
use serde::{Deserialize, Serialize};

/// Tournament configuration
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Rounds per pairwise match
    pub rounds: u32,
    /// Trembling-hand error probability, in [0, 0.5]
    pub noise: f64,
    /// Payoff matrix shared by every match
    pub payoff: PayoffMatrix,
    /// Whether to run matches in parallel
    pub parallel: bool,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            noise: 0.0,
            payoff: PayoffMatrix::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn new(rounds: u32, noise: f64) -> Self {
        Self {
            rounds,
            noise,
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

    /// Per-match parameters for this tournament
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.rounds, self.noise, self.payoff)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.match_config().validate()
    }
}
