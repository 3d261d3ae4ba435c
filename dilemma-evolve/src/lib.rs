//! Dilemma Evolve - population dynamics over the strategy catalog
//!
//! This crate provides the evolutionary layer:
//! - Population bookkeeping across the fixed catalog
//! - Per-generation fitness through pairwise matches
//! - Replaceable selection policies (steady-state ±1 by default)

mod evolution;
mod population;
mod selection;

pub use evolution::{
    run_evolution, run_evolution_with_observer, EvolutionConfig, Generation,
};
pub use population::Population;
pub use selection::{Fitness, SelectionPolicy, SteadyState};
