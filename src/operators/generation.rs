//! Initial population generators.

use crate::gene::Gene;
use crate::solver::InitialPopulationGenerator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates a population of fixed-length integer genes with alleles drawn
/// uniformly from an inclusive range. The null value is 0.
///
/// Genes are left unscored; the solver evaluates them at generation 0.
pub struct IntegerPopulationGenerator {
    gene_size: usize,
    population_size: usize,
    range_from: i64,
    range_to: i64,
    rng: StdRng,
}

impl IntegerPopulationGenerator {
    /// Creates a generator for `population_size` genes of `gene_size`
    /// alleles in `range_from..=range_to`.
    ///
    /// # Panics
    /// Panics if the range is empty.
    pub fn new(gene_size: usize, population_size: usize, range_from: i64, range_to: i64) -> Self {
        assert!(range_from <= range_to, "allele range must not be empty");
        Self {
            gene_size,
            population_size,
            range_from,
            range_to,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the generator's RNG for reproducible populations.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl InitialPopulationGenerator<i64> for IntegerPopulationGenerator {
    fn generate(&mut self) -> Vec<Gene<i64>> {
        (0..self.population_size)
            .map(|_| {
                let mut gene = Gene::new(0);
                for _ in 0..self.gene_size {
                    gene.push(self.rng.random_range(self.range_from..=self.range_to));
                }
                gene
            })
            .collect()
    }
}

/// The 0/1 special case of [`IntegerPopulationGenerator`].
pub struct BinaryPopulationGenerator {
    inner: IntegerPopulationGenerator,
}

impl BinaryPopulationGenerator {
    /// Creates a generator for `population_size` binary genes of
    /// `gene_size` alleles.
    pub fn new(gene_size: usize, population_size: usize) -> Self {
        Self {
            inner: IntegerPopulationGenerator::new(gene_size, population_size, 0, 1),
        }
    }

    /// Seeds the generator's RNG for reproducible populations.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.with_seed(seed);
        self
    }
}

impl InitialPopulationGenerator<i64> for BinaryPopulationGenerator {
    fn generate(&mut self) -> Vec<Gene<i64>> {
        self.inner.generate()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_generator_shape() {
        let mut g = IntegerPopulationGenerator::new(5, 12, -3, 3).with_seed(42);
        let pop = g.generate();
        assert_eq!(pop.len(), 12);
        for gene in &pop {
            assert_eq!(gene.len(), 5);
            assert_eq!(gene.fitness, None);
            assert_eq!(gene.age, 0);
            for &a in gene.iter() {
                assert!((-3..=3).contains(&a), "allele {a} out of range");
            }
        }
    }

    #[test]
    fn test_binary_generator_values() {
        let mut g = BinaryPopulationGenerator::new(16, 20).with_seed(42);
        let pop = g.generate();
        assert_eq!(pop.len(), 20);
        for gene in &pop {
            assert!(gene.iter().all(|&a| a == 0 || a == 1));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let pop_a = IntegerPopulationGenerator::new(8, 10, 0, 9).with_seed(7).generate();
        let pop_b = IntegerPopulationGenerator::new(8, 10, 0, 9).with_seed(7).generate();
        assert_eq!(pop_a, pop_b);
    }

    #[test]
    fn test_null_val_is_zero() {
        let pop = BinaryPopulationGenerator::new(3, 1).with_seed(1).generate();
        assert_eq!(*pop[0].null_val(), 0);
        assert_eq!(*pop[0].get(100), 0);
    }

    #[test]
    #[should_panic(expected = "allele range must not be empty")]
    fn test_empty_range_panics() {
        IntegerPopulationGenerator::new(3, 4, 5, 2);
    }
}
