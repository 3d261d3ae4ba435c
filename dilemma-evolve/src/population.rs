//! Population bookkeeping across the fixed catalog

use dilemma_core::{EngineError, StrategyId, CATALOG};
use serde::{Deserialize, Serialize};

/// Per-strategy population counts, stored in catalog order. Strategies
/// never listed by the caller sit at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    counts: [u32; CATALOG.len()],
}

impl Default for Population {
    /// Five of everything, the front-end's starting grid
    fn default() -> Self {
        Self::uniform(5)
    }
}

impl Population {
    /// The same count for every catalog entry
    pub fn uniform(count: u32) -> Self {
        Self {
            counts: [count; CATALOG.len()],
        }
    }

    /// From counts in catalog order
    pub fn from_counts(counts: [u32; CATALOG.len()]) -> Self {
        Self { counts }
    }

    /// From a caller-supplied vector, which must cover the whole catalog
    pub fn from_slice(counts: &[u32]) -> Result<Self, EngineError> {
        let counts: [u32; CATALOG.len()] = counts.try_into().map_err(|_| {
            EngineError::InvalidParameter(format!(
                "initial populations must have {} entries, got {}",
                CATALOG.len(),
                counts.len()
            ))
        })?;
        Ok(Self { counts })
    }

    /// From (strategy id, count) pairs; ids absent from the mapping stay 0
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut population = Self {
            counts: [0; CATALOG.len()],
        };
        for (id, count) in pairs {
            let strategy = StrategyId::from_id(id)?;
            population.counts[strategy.index()] = count;
        }
        Ok(population)
    }

    pub fn get(&self, strategy: StrategyId) -> u32 {
        self.counts[strategy.index()]
    }

    pub fn set(&mut self, strategy: StrategyId, count: u32) {
        self.counts[strategy.index()] = count;
    }

    /// Total individuals across the catalog
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }

    /// Strategies with population > 0, in catalog order
    pub fn active(&self) -> Vec<StrategyId> {
        CATALOG
            .iter()
            .copied()
            .filter(|&strategy| self.get(strategy) > 0)
            .collect()
    }

    /// (display name, count) pairs covering all catalog entries
    pub fn snapshot(&self) -> Vec<(String, u32)> {
        CATALOG
            .iter()
            .map(|&strategy| (strategy.name().to_string(), self.get(strategy)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_and_total() {
        let population = Population::uniform(5);
        assert_eq!(population.total(), 40);
        assert_eq!(population.active().len(), 8);
    }

    #[test]
    fn test_from_slice_requires_full_coverage() {
        assert!(Population::from_slice(&[1, 2, 3]).is_err());
        assert!(Population::from_slice(&[1; 9]).is_err());

        let population = Population::from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(population.get(StrategyId::AlwaysCooperate), 0);
        assert_eq!(population.get(StrategyId::Joss), 7);
    }

    #[test]
    fn test_from_pairs_defaults_missing_ids_to_zero() {
        let population =
            Population::from_pairs([("tit_for_tat", 10), ("always_defect", 3)]).unwrap();
        assert_eq!(population.get(StrategyId::TitForTat), 10);
        assert_eq!(population.get(StrategyId::AlwaysDefect), 3);
        assert_eq!(population.get(StrategyId::Pavlov), 0);
        assert_eq!(population.total(), 13);
    }

    #[test]
    fn test_from_pairs_rejects_unknown_ids() {
        let err = Population::from_pairs([("nice_guy", 4)]).unwrap_err();
        assert!(matches!(err, EngineError::UnknownStrategyId(_)));
    }

    #[test]
    fn test_active_skips_extinct_entries() {
        let mut population = Population::uniform(1);
        population.set(StrategyId::Random, 0);
        population.set(StrategyId::Joss, 0);
        let active = population.active();
        assert_eq!(active.len(), 6);
        assert!(!active.contains(&StrategyId::Random));
    }

    #[test]
    fn test_snapshot_covers_the_whole_catalog() {
        let mut population = Population::uniform(2);
        population.set(StrategyId::Pavlov, 0);
        let snapshot = population.snapshot();
        assert_eq!(snapshot.len(), 8);
        assert!(snapshot.contains(&("Pavlov".to_string(), 0)));
    }
}
