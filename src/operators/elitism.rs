//! Elitism extractors (mutation preventers).
//!
//! The extractor removes the elite prefix from the descending-sorted
//! population so the solver can carry those genes into the next generation
//! untouched by crossover and mutation.

use crate::gene::Gene;
use crate::solver::ElitismExtractor;

/// Extracts the top `count` genes of the population.
///
/// The population arrives sorted descending by fitness, so the prefix is the
/// current top-K. `count` larger than the population extracts everything.
pub struct EliteExtractor {
    count: usize,
}

impl EliteExtractor {
    /// Creates an extractor preserving the top `count` genes. A count of 0
    /// disables elitism.
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl<A> ElitismExtractor<A> for EliteExtractor {
    fn extract(&mut self, population: &mut Vec<Gene<A>>) -> Vec<Gene<A>> {
        let count = self.count.min(population.len());
        population.drain(..count).collect()
    }
}

/// No elitism: extracts nothing, leaving the population intact.
pub struct NoElitism;

impl<A> ElitismExtractor<A> for NoElitism {
    fn extract(&mut self, _population: &mut Vec<Gene<A>>) -> Vec<Gene<A>> {
        Vec::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
