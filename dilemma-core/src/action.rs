//! The atomic choice type and per-round records

use serde::{Deserialize, Serialize};

/// One player's choice in a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// The opposite choice
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn is_defect(self) -> bool {
        self == Action::Defect
    }
}

/// Realized action pair for one round, player-major
pub type Round = (Action, Action);
