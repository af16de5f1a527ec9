//! Two-parent crossover operators.
//!
//! Each operator re-samples a distinct parent pair from the parent set for
//! every offspring group and produces exactly enough offspring to fill a
//! generation (`pool.len()`). Offspring are fresh genes: unscored, age 0,
//! inheriting the first parent's null value.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use crate::gene::Gene;
use crate::solver::Crossoverer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Samples two distinct parents.
///
/// # Panics
/// Panics if fewer than two parents are supplied.
fn distinct_pair<'a, A>(parents: &'a [Gene<A>], rng: &mut StdRng) -> (&'a Gene<A>, &'a Gene<A>) {
    assert!(parents.len() >= 2, "crossover needs at least two parents");
    let pair = rand::seq::index::sample(rng, parents.len(), 2);
    (&parents[pair.index(0)], &parents[pair.index(1)])
}

/// Multi-point crossover: `point_cnt` distinct cut positions, alternating
/// the source parent at each cut.
///
/// The starting parent is chosen at random per offspring. Cut positions are
/// drawn from the first `gene_length - 1` indices, so every cut actually
/// splits the sequence.
pub struct MultiPointCrossoverer {
    point_cnt: usize,
    num_offspring: usize,
    rng: StdRng,
}

impl MultiPointCrossoverer {
    /// Creates a crossoverer with `point_cnt` cuts, producing
    /// `num_offspring` children per sampled parent pair.
    ///
    /// # Panics
    /// Panics if `point_cnt` or `num_offspring` is 0.
    pub fn new(point_cnt: usize, num_offspring: usize) -> Self {
        assert!(point_cnt >= 1, "multi-point crossover needs at least one cut");
        assert!(num_offspring >= 1, "offspring per pair must be at least 1");
        Self {
            point_cnt,
            num_offspring,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the crossoverer's RNG for reproducible recombination.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn recombine<A: Clone + PartialEq>(
        &mut self,
        gene_length: usize,
        first: &Gene<A>,
        second: &Gene<A>,
    ) -> Gene<A> {
        let cut_pool = gene_length.saturating_sub(1);
        let points: HashSet<usize> = if cut_pool == 0 {
            HashSet::new()
        } else {
            rand::seq::index::sample(&mut self.rng, cut_pool, self.point_cnt.min(cut_pool))
                .into_iter()
                .collect()
        };

        let parents = [first, second];
        let mut current = self.rng.random_range(0..2usize);
        let mut gene = Gene::new(first.null_val().clone());
        for i in 0..gene_length {
            gene.set(i, parents[current].get(i).clone());
            if points.contains(&i) {
                current = 1 - current;
            }
        }
        gene
    }
}

impl<A: Clone + PartialEq> Crossoverer<A> for MultiPointCrossoverer {
    fn crossover(&mut self, parents: &[Gene<A>], pool: &[Gene<A>]) -> Vec<Gene<A>> {
        let target = pool.len();
        let gene_length = pool.first().map_or(0, |g| g.len());

        let mut offspring = Vec::with_capacity(target);
        while offspring.len() < target {
            let (first, second) = distinct_pair(parents, &mut self.rng);
            for _ in 0..self.num_offspring {
                if offspring.len() == target {
                    break;
                }
                let child = self.recombine(gene_length, first, second);
                offspring.push(child);
            }
        }
        offspring
    }
}

/// One-point crossover: the single-cut special case of
/// [`MultiPointCrossoverer`].
pub struct OnePointCrossoverer {
    inner: MultiPointCrossoverer,
}

impl OnePointCrossoverer {
    /// Creates a one-point crossoverer producing `num_offspring` children
    /// per sampled parent pair.
    pub fn new(num_offspring: usize) -> Self {
        Self {
            inner: MultiPointCrossoverer::new(1, num_offspring),
        }
    }

    /// Seeds the crossoverer's RNG for reproducible recombination.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.with_seed(seed);
        self
    }
}

impl<A: Clone + PartialEq> Crossoverer<A> for OnePointCrossoverer {
    fn crossover(&mut self, parents: &[Gene<A>], pool: &[Gene<A>]) -> Vec<Gene<A>> {
        self.inner.crossover(parents, pool)
    }
}

/// Uniform crossover: every allele is drawn from the first parent of the
/// pair with probability `first_parent_probability`, from the second
/// otherwise.
pub struct UniformCrossoverer {
    num_offspring: usize,
    first_parent_probability: f64,
    rng: StdRng,
}

impl UniformCrossoverer {
    /// Creates a uniform crossoverer producing `num_offspring` children per
    /// sampled parent pair, with an even 0.5 per-allele parent choice.
    ///
    /// # Panics
    /// Panics if `num_offspring` is 0.
    pub fn new(num_offspring: usize) -> Self {
        assert!(num_offspring >= 1, "offspring per pair must be at least 1");
        Self {
            num_offspring,
            first_parent_probability: 0.5,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Sets the per-allele probability of inheriting from the first parent
    /// (clamped to 0.0–1.0).
    pub fn with_first_parent_probability(mut self, p: f64) -> Self {
        self.first_parent_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Seeds the crossoverer's RNG for reproducible recombination.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<A: Clone + PartialEq> Crossoverer<A> for UniformCrossoverer {
    fn crossover(&mut self, parents: &[Gene<A>], pool: &[Gene<A>]) -> Vec<Gene<A>> {
        let target = pool.len();
        let gene_length = pool.first().map_or(0, |g| g.len());

        let mut offspring = Vec::with_capacity(target);
        while offspring.len() < target {
            let (first, second) = distinct_pair(parents, &mut self.rng);
            for _ in 0..self.num_offspring {
                if offspring.len() == target {
                    break;
                }
                let mut gene = Gene::new(first.null_val().clone());
                for i in 0..gene_length {
                    let source = if self.rng.random::<f64>() < self.first_parent_probability {
                        first
                    } else {
                        second
                    };
                    gene.set(i, source.get(i).clone());
                }
                offspring.push(gene);
            }
        }
        offspring
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(alleles: &[i64]) -> Gene<i64> {
        Gene::from_alleles(0, alleles.to_vec())
    }

    /// Counts the parent switches a child exhibits relative to two fully
    /// distinguishable parents (all-zeros and all-ones).
    fn transitions(child: &Gene<i64>) -> usize {
        child
            .alleles()
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count()
    }

    fn zeros_ones_setup(n: usize) -> (Vec<Gene<i64>>, Vec<Gene<i64>>) {
        let parents = vec![gene(&vec![0; n]), gene(&vec![1; n])];
        let pool = parents.clone();
        (parents, pool)
    }

    // ---- Offspring shape ----

    #[test]
    fn test_offspring_fill_a_generation() {
        let (parents, _) = zeros_ones_setup(6);
        let pool: Vec<Gene<i64>> = (0..5).map(|_| gene(&[0; 6])).collect();
        let mut xo = OnePointCrossoverer::new(2).with_seed(42);
        let offspring = xo.crossover(&parents, &pool);
        assert_eq!(offspring.len(), 5);
    }

    #[test]
    fn test_offspring_are_fresh_genes() {
        let (parents, pool) = zeros_ones_setup(4);
        let mut xo = UniformCrossoverer::new(1).with_seed(42);
        for child in xo.crossover(&parents, &pool) {
            assert_eq!(child.fitness, None);
            assert_eq!(child.age, 0);
            assert_eq!(child.len(), 4);
        }
    }

    #[test]
    fn test_alleles_come_from_the_parents() {
        let parents = vec![gene(&[1, 2, 3, 4]), gene(&[5, 6, 7, 8])];
        let pool = parents.clone();
        let mut xo = MultiPointCrossoverer::new(2, 1).with_seed(42);
        for child in xo.crossover(&parents, &pool) {
            for (i, &a) in child.alleles().iter().enumerate() {
                let p1 = parents[0].alleles()[i];
                let p2 = parents[1].alleles()[i];
                assert!(a == p1 || a == p2, "allele {a} at {i} from neither parent");
            }
        }
    }

    // ---- Cut behavior ----

    #[test]
    fn test_one_point_has_at_most_one_transition() {
        let (parents, pool) = zeros_ones_setup(8);
        let mut xo = OnePointCrossoverer::new(1).with_seed(42);
        for _ in 0..50 {
            for child in xo.crossover(&parents, &pool) {
                assert!(
                    transitions(&child) <= 1,
                    "one-point child has multiple segments: {:?}",
                    child.alleles()
                );
            }
        }
    }

    #[test]
    fn test_multi_point_bounds_transitions() {
        let (parents, pool) = zeros_ones_setup(10);
        let mut xo = MultiPointCrossoverer::new(3, 1).with_seed(42);
        for _ in 0..50 {
            for child in xo.crossover(&parents, &pool) {
                assert!(
                    transitions(&child) <= 3,
                    "3-point child has too many segments: {:?}",
                    child.alleles()
                );
            }
        }
    }

    #[test]
    fn test_point_count_clamped_for_short_genes() {
        let parents = vec![gene(&[0, 1]), gene(&[1, 0])];
        let pool = parents.clone();
        let mut xo = MultiPointCrossoverer::new(10, 1).with_seed(42);
        let offspring = xo.crossover(&parents, &pool);
        assert_eq!(offspring.len(), 2); // completes despite point_cnt > cuts
    }

    // ---- Uniform ----

    #[test]
    fn test_uniform_probability_one_copies_one_parent() {
        let (parents, pool) = zeros_ones_setup(6);
        let mut xo = UniformCrossoverer::new(1)
            .with_first_parent_probability(1.0)
            .with_seed(42);
        for child in xo.crossover(&parents, &pool) {
            // The pair order is random, but every allele comes from the same
            // (first-of-pair) parent.
            let alleles = child.alleles();
            assert!(
                alleles.iter().all(|&a| a == 0) || alleles.iter().all(|&a| a == 1),
                "expected a verbatim parent copy, got {alleles:?}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "at least two parents")]
    fn test_single_parent_panics() {
        let parents = vec![gene(&[0, 1])];
        let pool = parents.clone();
        MultiPointCrossoverer::new(1, 1)
            .with_seed(42)
            .crossover(&parents, &pool);
    }
}
