//! Shared argument parsing and formatting helpers

use anyhow::{bail, Context, Result};
use dilemma_core::{Action, PayoffMatrix, Round};

/// Parse "T,R,P,S" into a payoff matrix
pub fn parse_payoff(arg: &str) -> Result<PayoffMatrix> {
    let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        bail!("expected four comma-separated values T,R,P,S, got {arg:?}");
    }
    let mut values = [0.0f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("bad payoff value {part:?}"))?;
    }
    Ok(PayoffMatrix::new(values[0], values[1], values[2], values[3]))
}

/// Parse a comma-separated list of population counts
pub fn parse_populations(arg: &str) -> Result<Vec<u32>> {
    arg.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .with_context(|| format!("bad population count {part:?}"))
        })
        .collect()
}

/// One side's realized actions as a compact C/D track
pub fn action_track(rounds: &[Round], first_player: bool) -> String {
    rounds
        .iter()
        .map(|&(a, b)| {
            let action = if first_player { a } else { b };
            match action {
                Action::Cooperate => 'C',
                Action::Defect => 'D',
            }
        })
        .collect()
}
