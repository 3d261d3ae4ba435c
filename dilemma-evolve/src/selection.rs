//! Selection policies applied after each generation's fitness pass
//!
//! The reference rule moves one population unit from the weakest eligible
//! strategy to the strongest. It sits behind a trait so the rule can be
//! swapped without touching the generation loop.

use dilemma_core::{StrategyId, CATALOG};

use crate::population::Population;

/// Per-generation fitness in catalog order; entries for inactive
/// strategies are ignored by policies
pub type Fitness = [f64; CATALOG.len()];

/// One selection step over a population
pub trait SelectionPolicy {
    fn apply(&self, population: &mut Population, fitness: &Fitness);
}

/// Steady-state ±1 selection: the fittest active strategy gains one
/// individual, the least fit active strategy that can afford the loss
/// (population > 1) gives one up. Ties resolve to the earlier catalog
/// entry. Total population is conserved, and a strategy at 0 can never
/// re-enter: extinction is absorbing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SteadyState;

impl SelectionPolicy for SteadyState {
    fn apply(&self, population: &mut Population, fitness: &Fitness) {
        let active = population.active();
        if active.len() < 2 {
            return;
        }

        let mut winner = active[0];
        for &strategy in &active[1..] {
            if fitness[strategy.index()] > fitness[winner.index()] {
                winner = strategy;
            }
        }

        // Only strategies above 1 are eligible to shrink; a loser at 1
        // would go extinct through selection, which this rule forbids
        let mut loser: Option<StrategyId> = None;
        for &strategy in &active {
            if population.get(strategy) > 1
                && loser.map_or(true, |current| {
                    fitness[strategy.index()] < fitness[current.index()]
                })
            {
                loser = Some(strategy);
            }
        }

        match loser {
            Some(loser) if loser != winner => {
                population.set(winner, population.get(winner) + 1);
                population.set(loser, population.get(loser) - 1);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitness_of(values: [f64; 8]) -> Fitness {
        values
    }

    #[test]
    fn test_winner_gains_loser_shrinks() {
        let mut population = Population::uniform(5);
        let fitness = fitness_of([10.0, 50.0, 30.0, 30.0, 30.0, 5.0, 30.0, 30.0]);
        SteadyState.apply(&mut population, &fitness);

        assert_eq!(population.get(StrategyId::AlwaysDefect), 6);
        assert_eq!(population.get(StrategyId::Random), 4);
        assert_eq!(population.total(), 40);
    }

    #[test]
    fn test_winner_tie_resolves_to_catalog_order() {
        let mut population = Population::uniform(5);
        // always_cooperate and joss tie for first
        let fitness = fitness_of([50.0, 10.0, 20.0, 20.0, 20.0, 20.0, 20.0, 50.0]);
        SteadyState.apply(&mut population, &fitness);

        assert_eq!(population.get(StrategyId::AlwaysCooperate), 6);
        assert_eq!(population.get(StrategyId::Joss), 5);
        assert_eq!(population.get(StrategyId::AlwaysDefect), 4);
    }

    #[test]
    fn test_loser_tie_resolves_to_catalog_order() {
        let mut population = Population::uniform(5);
        // tit_for_tat and pavlov tie for last
        let fitness = fitness_of([30.0, 50.0, 5.0, 30.0, 5.0, 30.0, 30.0, 30.0]);
        SteadyState.apply(&mut population, &fitness);

        assert_eq!(population.get(StrategyId::TitForTat), 4);
        assert_eq!(population.get(StrategyId::Pavlov), 5);
    }

    #[test]
    fn test_extinct_strategies_never_win() {
        let mut population = Population::uniform(5);
        population.set(StrategyId::AlwaysCooperate, 0);
        // The extinct entry carries the top fitness value; it must be ignored
        let fitness = fitness_of([99.0, 40.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]);
        SteadyState.apply(&mut population, &fitness);

        assert_eq!(population.get(StrategyId::AlwaysCooperate), 0);
        assert_eq!(population.get(StrategyId::AlwaysDefect), 6);
    }

    #[test]
    fn test_loser_at_one_is_protected() {
        let mut population = Population::from_counts([5, 5, 1, 5, 5, 5, 5, 5]);
        // tit_for_tat is worst but only has one individual left
        let fitness = fitness_of([30.0, 50.0, 1.0, 2.0, 30.0, 30.0, 30.0, 30.0]);
        SteadyState.apply(&mut population, &fitness);

        assert_eq!(population.get(StrategyId::TitForTat), 1);
        // The next-worst eligible strategy pays instead
        assert_eq!(population.get(StrategyId::GrimTrigger), 4);
        assert_eq!(population.get(StrategyId::AlwaysDefect), 6);
    }

    #[test]
    fn test_no_eligible_loser_leaves_population_unchanged() {
        let population_before = Population::uniform(1);
        let mut population = population_before;
        let fitness = fitness_of([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        SteadyState.apply(&mut population, &fitness);
        assert_eq!(population, population_before);
    }

    #[test]
    fn test_single_active_strategy_is_a_no_op() {
        let mut population = Population::from_pairs([("grim_trigger", 12)]).unwrap();
        let before = population;
        SteadyState.apply(&mut population, &fitness_of([0.0; 8]));
        assert_eq!(population, before);
    }

    #[test]
    fn test_winner_equal_to_loser_is_a_no_op() {
        // Only one strategy can afford the loss and it is also the winner
        let mut population = Population::from_counts([9, 1, 1, 1, 1, 1, 1, 1]);
        let before = population;
        let fitness = fitness_of([50.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        SteadyState.apply(&mut population, &fitness);
        assert_eq!(population, before);
    }
}
