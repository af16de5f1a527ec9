//! Mutation operators.
//!
//! Mutators receive genes by value and mutate in place through
//! [`Gene::set`], which keeps the fitness-cache invalidation exact: an
//! allele rewritten to its current value leaves the cached score intact.

use crate::gene::Gene;
use crate::solver::{FitnessCalculator, Mutator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random-resetting mutation: with probability `probability` per allele,
/// replace the value with a uniformly drawn *different* member of the
/// allowed set.
pub struct RandomResettingMutator<A> {
    allowed: Vec<A>,
    probability: f64,
    rng: StdRng,
}

impl<A: Clone + PartialEq> RandomResettingMutator<A> {
    /// Creates a mutator over the given allowed values.
    ///
    /// The probability is clamped to 0.0–1.0.
    ///
    /// # Panics
    /// Panics if `allowed` is empty.
    pub fn new(allowed: Vec<A>, probability: f64) -> Self {
        assert!(!allowed.is_empty(), "allowed value set must not be empty");
        Self {
            allowed,
            probability: probability.clamp(0.0, 1.0),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the mutator's RNG for reproducible perturbation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn reset_allele(&mut self, gene: &mut Gene<A>, index: usize) {
        let current = gene.get(index).clone();
        let options: Vec<usize> = (0..self.allowed.len())
            .filter(|&j| self.allowed[j] != current)
            .collect();
        if options.is_empty() {
            return; // the allowed set only contains the current value
        }
        let pick = options[self.rng.random_range(0..options.len())];
        gene.set(index, self.allowed[pick].clone());
    }
}

impl<A: Clone + PartialEq> Mutator<A> for RandomResettingMutator<A> {
    fn mutate(&mut self, mut genes: Vec<Gene<A>>) -> Vec<Gene<A>> {
        for gene in genes.iter_mut() {
            for i in 0..gene.len() {
                if self.rng.random::<f64>() < self.probability {
                    self.reset_allele(gene, i);
                }
            }
        }
        genes
    }
}

/// Bit-flip mutation: random resetting over `{0, 1}`.
pub struct BitFlipMutator {
    inner: RandomResettingMutator<i64>,
}

impl BitFlipMutator {
    /// Creates a bit-flip mutator with the given per-allele probability.
    pub fn new(probability: f64) -> Self {
        Self {
            inner: RandomResettingMutator::new(vec![0, 1], probability),
        }
    }

    /// Seeds the mutator's RNG for reproducible perturbation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.with_seed(seed);
        self
    }
}

impl Mutator<i64> for BitFlipMutator {
    fn mutate(&mut self, genes: Vec<Gene<i64>>) -> Vec<Gene<i64>> {
        self.inner.mutate(genes)
    }
}

/// Greedy local search: with probability `probability` per gene, run one
/// steepest-ascent sweep — at every position, keep whichever allowed value
/// maximizes fitness.
///
/// Owns its [`FitnessCalculator`]; give it the same calculator (or an
/// equivalent instance) as the solver so the improved scores agree.
pub struct GreedyLocalSearchMutator<A, F> {
    calculator: F,
    allowed: Vec<A>,
    probability: f64,
    rng: StdRng,
}

impl<A: Clone + PartialEq, F: FitnessCalculator<A>> GreedyLocalSearchMutator<A, F> {
    /// Creates a greedy mutator sweeping over the given allowed values.
    ///
    /// The probability is clamped to 0.0–1.0.
    ///
    /// # Panics
    /// Panics if `allowed` is empty.
    pub fn new(calculator: F, allowed: Vec<A>, probability: f64) -> Self {
        assert!(!allowed.is_empty(), "allowed value set must not be empty");
        Self {
            calculator,
            allowed,
            probability: probability.clamp(0.0, 1.0),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the mutator's RNG for reproducible gene picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn sweep(&mut self, gene: &mut Gene<A>) {
        for i in 0..gene.len() {
            let current = gene.get(i).clone();
            let mut best_val = current.clone();
            let mut best_fit = self.calculator.fitness(gene);
            for candidate in &self.allowed {
                if *candidate == current {
                    continue;
                }
                gene.set(i, candidate.clone());
                let fit = self.calculator.fitness(gene);
                if fit > best_fit {
                    best_fit = fit;
                    best_val = candidate.clone();
                }
            }
            gene.set(i, best_val);
            gene.fitness = Some(best_fit);
        }
    }
}

impl<A: Clone + PartialEq, F: FitnessCalculator<A>> Mutator<A> for GreedyLocalSearchMutator<A, F> {
    fn mutate(&mut self, mut genes: Vec<Gene<A>>) -> Vec<Gene<A>> {
        for gene in genes.iter_mut() {
            if self.rng.random::<f64>() < self.probability {
                self.sweep(gene);
            }
        }
        genes
    }
}

// ============================================================================
// Tests
// ============================================================================
