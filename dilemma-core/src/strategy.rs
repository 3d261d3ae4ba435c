//! The built-in strategy catalog
//!
//! Every strategy is a pure decision rule over the two realized histories.
//! Latch-like behavior (Grim Trigger, Pavlov) is re-derived from history on
//! every call; there is no per-match strategy state. Probabilistic variants
//! draw from the generator handed in by the match engine, never a global one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::EngineError;
use crate::payoff::PayoffMatrix;

/// Probability that Generous Tit-For-Tat forgives instead of retaliating
const FORGIVENESS: f64 = 0.10;

/// Probability that Joss slips a defection into a cooperative move
const EXPLOITATION: f64 = 0.10;

/// Built-in strategy, dispatched as a closed sum type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    AlwaysCooperate,
    AlwaysDefect,
    TitForTat,
    GrimTrigger,
    Pavlov,
    Random,
    GenerousTitForTat,
    Joss,
}

/// The full catalog in fixed order; deterministic tie-breaks throughout the
/// engine resolve to the earlier entry
pub const CATALOG: [StrategyId; 8] = [
    StrategyId::AlwaysCooperate,
    StrategyId::AlwaysDefect,
    StrategyId::TitForTat,
    StrategyId::GrimTrigger,
    StrategyId::Pavlov,
    StrategyId::Random,
    StrategyId::GenerousTitForTat,
    StrategyId::Joss,
];

impl StrategyId {
    /// Look up a strategy by its stable string id
    pub fn from_id(id: &str) -> Result<Self, EngineError> {
        match id {
            "always_cooperate" => Ok(StrategyId::AlwaysCooperate),
            "always_defect" => Ok(StrategyId::AlwaysDefect),
            "tit_for_tat" => Ok(StrategyId::TitForTat),
            "grim_trigger" => Ok(StrategyId::GrimTrigger),
            "pavlov" => Ok(StrategyId::Pavlov),
            "random" => Ok(StrategyId::Random),
            // "generous_tft" is the shorthand older front-end payloads used
            "generous_tit_for_tat" | "generous_tft" => Ok(StrategyId::GenerousTitForTat),
            "joss" => Ok(StrategyId::Joss),
            other => Err(EngineError::UnknownStrategyId(other.to_string())),
        }
    }

    /// Stable string id
    pub fn id(&self) -> &'static str {
        match self {
            StrategyId::AlwaysCooperate => "always_cooperate",
            StrategyId::AlwaysDefect => "always_defect",
            StrategyId::TitForTat => "tit_for_tat",
            StrategyId::GrimTrigger => "grim_trigger",
            StrategyId::Pavlov => "pavlov",
            StrategyId::Random => "random",
            StrategyId::GenerousTitForTat => "generous_tit_for_tat",
            StrategyId::Joss => "joss",
        }
    }

    /// Human-readable display name
    pub fn name(&self) -> &'static str {
        match self {
            StrategyId::AlwaysCooperate => "Always Cooperate",
            StrategyId::AlwaysDefect => "Always Defect",
            StrategyId::TitForTat => "Tit-For-Tat",
            StrategyId::GrimTrigger => "Grim Trigger",
            StrategyId::Pavlov => "Pavlov",
            StrategyId::Random => "Random",
            StrategyId::GenerousTitForTat => "Generous TFT",
            StrategyId::Joss => "Joss",
        }
    }

    /// Position in the fixed catalog
    pub fn index(&self) -> usize {
        match self {
            StrategyId::AlwaysCooperate => 0,
            StrategyId::AlwaysDefect => 1,
            StrategyId::TitForTat => 2,
            StrategyId::GrimTrigger => 3,
            StrategyId::Pavlov => 4,
            StrategyId::Random => 5,
            StrategyId::GenerousTitForTat => 6,
            StrategyId::Joss => 7,
        }
    }

    /// Decide the next intended action from the realized histories.
    ///
    /// `own` and `opp` are this strategy's and the opponent's realized
    /// actions so far, oldest first; both have the same length.
    pub fn decide<R: Rng>(
        &self,
        own: &[Action],
        opp: &[Action],
        payoff: &PayoffMatrix,
        rng: &mut R,
    ) -> Action {
        match self {
            StrategyId::AlwaysCooperate => Action::Cooperate,

            StrategyId::AlwaysDefect => Action::Defect,

            StrategyId::TitForTat => opp.last().copied().unwrap_or(Action::Cooperate),

            StrategyId::GrimTrigger => {
                if opp.iter().any(|a| a.is_defect()) {
                    Action::Defect
                } else {
                    Action::Cooperate
                }
            }

            // Win-stay/lose-shift against the Reward threshold of the
            // active matrix
            StrategyId::Pavlov => match (own.last(), opp.last()) {
                (Some(&mine), Some(&theirs)) => {
                    let (earned, _) = payoff.payoff(mine, theirs);
                    if earned >= payoff.r {
                        mine
                    } else {
                        mine.flip()
                    }
                }
                _ => Action::Cooperate,
            },

            StrategyId::Random => {
                if rng.gen_bool(0.5) {
                    Action::Cooperate
                } else {
                    Action::Defect
                }
            }

            StrategyId::GenerousTitForTat => match opp.last() {
                None | Some(Action::Cooperate) => Action::Cooperate,
                Some(Action::Defect) => {
                    if rng.gen_bool(FORGIVENESS) {
                        Action::Cooperate
                    } else {
                        Action::Defect
                    }
                }
            },

            StrategyId::Joss => match opp.last() {
                Some(Action::Defect) => Action::Defect,
                None | Some(Action::Cooperate) => {
                    if rng.gen_bool(EXPLOITATION) {
                        Action::Defect
                    } else {
                        Action::Cooperate
                    }
                }
            },
        }
    }
}
