//! Termination predicates.
//!
//! A terminator is evaluated once per generation on the freshly selected
//! population (sorted descending by fitness), the best-ever gene, and the
//! generation counter. Stateful terminators keep their counters across
//! calls, so one instance observes one run.

use crate::gene::Gene;
use crate::solver::Terminator;

fn fitness_of<A>(gene: &Gene<A>) -> f64 {
    gene.fitness.unwrap_or(f64::NEG_INFINITY)
}

/// Stops once `generation_cnt` reaches the configured limit.
///
/// The counter is 0 for the initial population, so a limit of `n` allows
/// exactly `n` bred generations.
pub struct GenerationCountTerminator {
    limit: usize,
}

impl GenerationCountTerminator {
    /// Creates a terminator stopping at generation `limit`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl<A> Terminator<A> for GenerationCountTerminator {
    fn should_terminate(
        &mut self,
        _population: &[Gene<A>],
        _best: &Gene<A>,
        generation_cnt: usize,
    ) -> bool {
        generation_cnt >= self.limit
    }
}

/// Stops after `limit` consecutive generations without strict improvement
/// of the generation's top fitness.
///
/// Watches the population's leading gene rather than the solver's best-ever
/// tracker, so a run that plateaus below an earlier peak still counts as
/// stagnant.
pub struct NoImprovementTerminator {
    limit: usize,
    best_seen: Option<f64>,
    stagnant: usize,
}

impl NoImprovementTerminator {
    /// Creates a terminator firing after `limit` stagnant generations.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            best_seen: None,
            stagnant: 0,
        }
    }
}

impl<A> Terminator<A> for NoImprovementTerminator {
    fn should_terminate(
        &mut self,
        population: &[Gene<A>],
        _best: &Gene<A>,
        _generation_cnt: usize,
    ) -> bool {
        let top = population.first().map(fitness_of);
        let improved = match (self.best_seen, top) {
            (None, _) => true,
            (Some(prev), Some(cur)) => cur > prev,
            (Some(_), None) => false,
        };
        if improved {
            self.best_seen = top;
            self.stagnant = 0;
        } else {
            self.stagnant += 1;
        }
        self.stagnant >= self.limit
    }
}

/// Stops when the population has degenerated: the leading fraction of genes
/// whose relative fitness gap to the generation's best stays below
/// `fitness_threshold` reaches `population_percentage_limit`.
///
/// "Leading" is literal — the scan walks the descending-sorted population
/// from the top and stops at the first gene outside the threshold, so the
/// measured group is the converged head of the population.
pub struct FitnessDegenerationTerminator {
    population_percentage_limit: f64,
    fitness_threshold: f64,
}

impl FitnessDegenerationTerminator {
    /// Creates a terminator firing when the converged fraction reaches
    /// `population_percentage_limit` (0.0–1.0), using `fitness_threshold`
    /// as the relative-gap bound.
    pub fn new(population_percentage_limit: f64, fitness_threshold: f64) -> Self {
        Self {
            population_percentage_limit: population_percentage_limit.clamp(0.0, 1.0),
            fitness_threshold,
        }
    }

    fn converged_head_len<A>(&self, population: &[Gene<A>]) -> usize {
        let best = fitness_of(&population[0]);
        let mut cnt = 0;
        for gene in population {
            let fit = fitness_of(gene);
            let gap = if best != 0.0 {
                (best - fit) / best
            } else if fit == best {
                0.0
            } else {
                f64::INFINITY
            };
            if gap < self.fitness_threshold {
                cnt += 1;
            } else {
                break;
            }
        }
        cnt
    }
}

impl<A> Terminator<A> for FitnessDegenerationTerminator {
    fn should_terminate(
        &mut self,
        population: &[Gene<A>],
        _best: &Gene<A>,
        _generation_cnt: usize,
    ) -> bool {
        if population.is_empty() {
            return false;
        }
        let converged = self.converged_head_len(population) as f64;
        converged / population.len() as f64 >= self.population_percentage_limit
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn population(fitnesses: &[f64]) -> Vec<Gene<i64>> {
        fitnesses
            .iter()
            .map(|&f| {
                let mut g: Gene<i64> = Gene::new(0);
                g.fitness = Some(f);
                g
            })
            .collect()
    }

    fn best() -> Gene<i64> {
        let mut g: Gene<i64> = Gene::new(0);
        g.fitness = Some(99.0);
        g
    }

    // ---- Generation count ----

    #[test]
    fn test_generation_count_boundary() {
        let mut t = GenerationCountTerminator::new(5);
        let pop = population(&[1.0]);
        assert!(!t.should_terminate(&pop, &best(), 4));
        assert!(t.should_terminate(&pop, &best(), 5));
        assert!(t.should_terminate(&pop, &best(), 6));
    }

    // ---- No improvement ----

    #[test]
    fn test_no_improvement_counts_stagnant_generations() {
        let mut t = NoImprovementTerminator::new(3);
        let b = best();

        // First observation establishes the baseline.
        assert!(!t.should_terminate(&population(&[5.0]), &b, 1));
        // Stagnating…
        assert!(!t.should_terminate(&population(&[5.0]), &b, 2));
        assert!(!t.should_terminate(&population(&[4.0]), &b, 3));
        // Third stagnant generation fires.
        assert!(t.should_terminate(&population(&[5.0]), &b, 4));
    }

    #[test]
    fn test_no_improvement_resets_on_progress() {
        let mut t = NoImprovementTerminator::new(2);
        let b = best();

        assert!(!t.should_terminate(&population(&[5.0]), &b, 1));
        assert!(!t.should_terminate(&population(&[5.0]), &b, 2));
        // Strict improvement resets the counter.
        assert!(!t.should_terminate(&population(&[6.0]), &b, 3));
        assert!(!t.should_terminate(&population(&[6.0]), &b, 4));
        assert!(t.should_terminate(&population(&[6.0]), &b, 5));
    }

    // ---- Fitness degeneration ----

    #[test]
    fn test_degeneration_fires_on_converged_population() {
        let mut t = FitnessDegenerationTerminator::new(0.75, 0.05);
        // Three of four genes within 5% of the top.
        let pop = population(&[10.0, 9.9, 9.8, 5.0]);
        assert!(t.should_terminate(&pop, &best(), 1));
    }

    #[test]
    fn test_degeneration_holds_on_diverse_population() {
        let mut t = FitnessDegenerationTerminator::new(0.75, 0.05);
        let pop = population(&[10.0, 8.0, 6.0, 4.0]);
        assert!(!t.should_terminate(&pop, &best(), 1));
    }

    #[test]
    fn test_degeneration_scan_stops_at_first_outlier() {
        let mut t = FitnessDegenerationTerminator::new(0.5, 0.05);
        // The gap at position 1 breaks the scan even though position 2 is
        // close to the top again.
        let pop = population(&[10.0, 5.0, 9.9, 9.9]);
        assert!(!t.should_terminate(&pop, &best(), 1));
    }

    #[test]
    fn test_degeneration_zero_best_does_not_divide() {
        let mut t = FitnessDegenerationTerminator::new(1.0, 0.05);
        let pop = population(&[0.0, 0.0]);
        assert!(t.should_terminate(&pop, &best(), 1));
    }
}
