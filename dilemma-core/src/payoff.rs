//! Payoff matrix and per-round payoff lookup

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::EngineError;

/// The four payoff parameters: Temptation, Reward, Punishment, Sucker
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    pub t: f64,
    pub r: f64,
    pub p: f64,
    pub s: f64,
}

impl Default for PayoffMatrix {
    /// The classic Axelrod values
    fn default() -> Self {
        Self {
            t: 5.0,
            r: 3.0,
            p: 1.0,
            s: 0.0,
        }
    }
}

impl PayoffMatrix {
    pub const fn new(t: f64, r: f64, p: f64, s: f64) -> Self {
        Self { t, r, p, s }
    }

    /// Payoffs for a realized action pair, player-major
    pub fn payoff(&self, a1: Action, a2: Action) -> (f64, f64) {
        match (a1, a2) {
            (Action::Cooperate, Action::Cooperate) => (self.r, self.r),
            (Action::Cooperate, Action::Defect) => (self.s, self.t),
            (Action::Defect, Action::Cooperate) => (self.t, self.s),
            (Action::Defect, Action::Defect) => (self.p, self.p),
        }
    }

    /// Reject non-finite entries; any finite values are accepted
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [("t", self.t), ("r", self.r), ("p", self.p), ("s", self.s)] {
            if !value.is_finite() {
                return Err(EngineError::MalformedPayoff(format!(
                    "{name} is not finite: {value}"
                )));
            }
        }
        Ok(())
    }

    /// Whether the canonical dilemma ordering holds:
    /// T > R > P > S and 2R > T + S
    pub fn is_strict_dilemma(&self) -> bool {
        self.t > self.r && self.r > self.p && self.p > self.s && 2.0 * self.r > self.t + self.s
    }

    /// Log a warning when the matrix is not a genuine dilemma. The engine
    /// still accepts it; the front-end permits arbitrary numeric entry.
    pub fn warn_if_not_strict(&self) {
        if !self.is_strict_dilemma() {
            tracing::warn!(
                t = self.t,
                r = self.r,
                p = self.p,
                s = self.s,
                "payoff matrix violates T > R > P > S, 2R > T + S"
            );
        }
    }
}
