//! The generational loop.
//!
//! [`Solver`] owns the population between generations and drives the fixed
//! per-generation strategy order: elitism extraction → parent selection →
//! crossover → mutation → fitness evaluation + constraint repair → best
//! tracking → survivor selection → aging → rendering → termination check.
//!
//! Strategies are injected through [`SolverBuilder`]; the solver itself
//! contains no problem knowledge.

use super::error::SolverError;
use super::types::{
    Crossoverer, ElitismExtractor, FitnessCalculator, InitialPopulationGenerator, Mutator,
    NonSolutionHandler, ParentSelector, Renderer, SuddenDeath, SurvivorSelector, Terminator,
};
use crate::gene::Gene;
use crate::render::NoopRenderer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sorts genes descending by fitness. Stable, so ties preserve insertion
/// order and runs stay deterministic for a fixed set of strategy seeds.
fn sort_desc<A>(genes: &mut [Gene<A>]) {
    genes.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn fitness_of<A>(gene: &Gene<A>) -> f64 {
    gene.fitness.unwrap_or(f64::NEG_INFINITY)
}

/// Returns the first gene with maximal fitness (strict comparison keeps the
/// earliest-found optimum on ties).
fn first_max<A>(genes: &[Gene<A>]) -> Option<&Gene<A>> {
    let mut best: Option<&Gene<A>> = None;
    for gene in genes {
        match best {
            Some(b) if fitness_of(gene) <= fitness_of(b) => {}
            _ => best = Some(gene),
        }
    }
    best
}

/// Builder collecting the strategies that assemble a [`Solver`].
///
/// All strategies are mandatory except the renderer (defaults to
/// [`NoopRenderer`]); [`build`](SolverBuilder::build) reports the first
/// missing one as [`SolverError::MissingStrategy`].
pub struct SolverBuilder<A> {
    generator: Option<Box<dyn InitialPopulationGenerator<A>>>,
    fitness_calculator: Option<Box<dyn FitnessCalculator<A>>>,
    elitism_extractor: Option<Box<dyn ElitismExtractor<A>>>,
    parent_selector: Option<Box<dyn ParentSelector<A>>>,
    crossoverer: Option<Box<dyn Crossoverer<A>>>,
    mutator: Option<Box<dyn Mutator<A>>>,
    non_solution_handler: Option<Box<dyn NonSolutionHandler<A>>>,
    survivor_selector: Option<Box<dyn SurvivorSelector<A>>>,
    terminator: Option<Box<dyn Terminator<A>>>,
    renderer: Option<Box<dyn Renderer<A>>>,
    cancel: Option<Arc<AtomicBool>>,
    seed: Option<u64>,
}

impl<A> Default for SolverBuilder<A> {
    fn default() -> Self {
        Self {
            generator: None,
            fitness_calculator: None,
            elitism_extractor: None,
            parent_selector: None,
            crossoverer: None,
            mutator: None,
            non_solution_handler: None,
            survivor_selector: None,
            terminator: None,
            renderer: None,
            cancel: None,
            seed: None,
        }
    }
}

impl<A: 'static> SolverBuilder<A> {
    /// Sets the initial population generator.
    pub fn with_generator(mut self, g: impl InitialPopulationGenerator<A> + 'static) -> Self {
        self.generator = Some(Box::new(g));
        self
    }

    /// Sets the fitness calculator.
    pub fn with_fitness_calculator(mut self, f: impl FitnessCalculator<A> + 'static) -> Self {
        self.fitness_calculator = Some(Box::new(f));
        self
    }

    /// Sets the elitism extractor.
    pub fn with_elitism_extractor(mut self, e: impl ElitismExtractor<A> + 'static) -> Self {
        self.elitism_extractor = Some(Box::new(e));
        self
    }

    /// Sets the parent selector.
    pub fn with_parent_selector(mut self, s: impl ParentSelector<A> + 'static) -> Self {
        self.parent_selector = Some(Box::new(s));
        self
    }

    /// Sets the crossoverer.
    pub fn with_crossoverer(mut self, c: impl Crossoverer<A> + 'static) -> Self {
        self.crossoverer = Some(Box::new(c));
        self
    }

    /// Sets the mutator.
    pub fn with_mutator(mut self, m: impl Mutator<A> + 'static) -> Self {
        self.mutator = Some(Box::new(m));
        self
    }

    /// Sets the non-solution handler.
    pub fn with_non_solution_handler(mut self, h: impl NonSolutionHandler<A> + 'static) -> Self {
        self.non_solution_handler = Some(Box::new(h));
        self
    }

    /// Sets the survivor selector.
    pub fn with_survivor_selector(mut self, s: impl SurvivorSelector<A> + 'static) -> Self {
        self.survivor_selector = Some(Box::new(s));
        self
    }

    /// Sets the terminator.
    pub fn with_terminator(mut self, t: impl Terminator<A> + 'static) -> Self {
        self.terminator = Some(Box::new(t));
        self
    }

    /// Sets the renderer. Optional; defaults to [`NoopRenderer`].
    pub fn with_renderer(mut self, r: impl Renderer<A> + 'static) -> Self {
        self.renderer = Some(Box::new(r));
        self
    }

    /// Supplies the cooperative-cancellation flag.
    ///
    /// Optional; a fresh flag is created otherwise and can be retrieved with
    /// [`Solver::cancel_flag`]. Set the flag to `true` (typically from an
    /// interrupt handler) to make the solver finish the current generation
    /// and return the best-so-far gene.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Seeds the solver's own RNG (used only to draw replacement genes from
    /// the repair pool). Unseeded solvers draw from OS entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Assembles the solver, verifying every mandatory strategy is present.
    pub fn build(self) -> Result<Solver<A>, SolverError> {
        Ok(Solver {
            generator: self
                .generator
                .ok_or(SolverError::MissingStrategy("initial_population_generator"))?,
            fitness_calculator: self
                .fitness_calculator
                .ok_or(SolverError::MissingStrategy("fitness_calculator"))?,
            elitism_extractor: self
                .elitism_extractor
                .ok_or(SolverError::MissingStrategy("elitism_extractor"))?,
            parent_selector: self
                .parent_selector
                .ok_or(SolverError::MissingStrategy("parent_selector"))?,
            crossoverer: self
                .crossoverer
                .ok_or(SolverError::MissingStrategy("crossoverer"))?,
            mutator: self.mutator.ok_or(SolverError::MissingStrategy("mutator"))?,
            non_solution_handler: self
                .non_solution_handler
                .ok_or(SolverError::MissingStrategy("non_solution_handler"))?,
            survivor_selector: self
                .survivor_selector
                .ok_or(SolverError::MissingStrategy("survivor_selector"))?,
            terminator: self
                .terminator
                .ok_or(SolverError::MissingStrategy("terminator"))?,
            renderer: self.renderer.unwrap_or_else(|| Box::new(NoopRenderer)),
            cancel: self.cancel.unwrap_or_default(),
            rng: match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
        })
    }
}

/// Drives the generational evolutionary loop.
///
/// Constructed via [`Solver::builder`] with one instance of each strategy;
/// [`run`](Solver::run) executes until termination and returns the best gene
/// found over the entire run, not merely the final generation's best.
///
/// # Conventions
///
/// - Fitness is maximized; all comparisons are strict, so ties never displace
///   an earlier optimum.
/// - `generation_cnt` is 0 for the initial population; the first bred
///   generation is 1. A generation-count terminator with limit `n` therefore
///   stops after `n` bred generations.
/// - The solver evaluates fitness only for genes whose cache is unset;
///   generators and repair handlers may pre-score.
///
/// # Usage
///
/// ```
/// use evogen::gene::Gene;
/// use evogen::operators::{
///     BinaryPopulationGenerator, BitFlipMutator, EliteExtractor, OnePointCrossoverer,
///     PassThroughHandler, TournamentSelector,
/// };
/// use evogen::solver::{FitnessCalculator, Solver};
/// use evogen::termination::GenerationCountTerminator;
///
/// struct OneMax;
///
/// impl FitnessCalculator<i64> for OneMax {
///     fn fitness(&self, gene: &Gene<i64>) -> f64 {
///         gene.iter().sum::<i64>() as f64
///     }
/// }
///
/// let mut solver = Solver::builder()
///     .with_generator(BinaryPopulationGenerator::new(8, 20).with_seed(42))
///     .with_fitness_calculator(OneMax)
///     .with_elitism_extractor(EliteExtractor::new(2))
///     .with_parent_selector(TournamentSelector::new(6, 2, 3).with_seed(1))
///     .with_crossoverer(OnePointCrossoverer::new(2).with_seed(2))
///     .with_mutator(BitFlipMutator::new(0.05).with_seed(3))
///     .with_non_solution_handler(PassThroughHandler)
///     .with_survivor_selector(TournamentSelector::new(2, 2, 3).with_seed(4))
///     .with_terminator(GenerationCountTerminator::new(30))
///     .build()?;
///
/// let best = solver.run()?;
/// assert!(best.fitness.unwrap() <= 8.0);
/// # Ok::<(), evogen::solver::SolverError>(())
/// ```
pub struct Solver<A> {
    generator: Box<dyn InitialPopulationGenerator<A>>,
    fitness_calculator: Box<dyn FitnessCalculator<A>>,
    elitism_extractor: Box<dyn ElitismExtractor<A>>,
    parent_selector: Box<dyn ParentSelector<A>>,
    crossoverer: Box<dyn Crossoverer<A>>,
    mutator: Box<dyn Mutator<A>>,
    non_solution_handler: Box<dyn NonSolutionHandler<A>>,
    survivor_selector: Box<dyn SurvivorSelector<A>>,
    terminator: Box<dyn Terminator<A>>,
    renderer: Box<dyn Renderer<A>>,
    cancel: Arc<AtomicBool>,
    rng: StdRng,
}

impl<A> std::fmt::Debug for Solver<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver").finish_non_exhaustive()
    }
}

impl<A: 'static> Solver<A> {
    /// Starts assembling a solver.
    pub fn builder() -> SolverBuilder<A> {
        SolverBuilder::default()
    }

    /// The cooperative-cancellation flag.
    ///
    /// Store `true` from any thread (or an interrupt handler) to stop the
    /// run. The flag is polled once per generation, after the termination
    /// check, so cancellation never truncates a generation in flight.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }
}

impl<A: Clone + PartialEq + 'static> Solver<A> {
    /// Runs the evolutionary loop until termination.
    ///
    /// Returns the best-ever gene. Errors indicate a misassembled pipeline
    /// (see [`SolverError`]) and are raised at the point of detection.
    pub fn run(&mut self) -> Result<Gene<A>, SolverError> {
        let mut population = self.generator.generate();
        if population.is_empty() {
            return Err(SolverError::EmptyInitialPopulation);
        }
        let population_size = population.len();

        for gene in population.iter_mut() {
            if gene.fitness.is_none() {
                gene.fitness = Some(self.fitness_calculator.fitness(gene));
            }
        }
        sort_desc(&mut population);

        let mut best = population[0].clone();
        let mut generation_cnt = 0usize;
        self.renderer.append(&population, &best, generation_cnt);

        loop {
            let breeding = generation_cnt + 1;

            // Strip the elite off; `population` is the remainder from here on
            // and doubles as the pristine repair pool for this generation.
            let elite = self.elitism_extractor.extract(&mut population);

            let pool: Vec<Gene<A>> = elite.iter().chain(population.iter()).cloned().collect();
            let parents = self.parent_selector.select_parents(&pool);
            let offspring = self.crossoverer.crossover(&parents, &pool);
            drop(pool);

            let offspring = self.mutator.mutate(offspring);
            // The remainder is deep-copied before mutation: survivor-side
            // repair below substitutes from the unmutated previous generation.
            let mutated_remainder = self.mutator.mutate(population.clone());

            let mut candidates = elite;
            candidates.extend(offspring);
            candidates.extend(mutated_remainder);

            // Fitness evaluation + constraint repair. The replacement pool is
            // materialized lazily, on the first rejection only.
            let mut replacement_pool: Option<Vec<Gene<A>>> = None;
            let mut repaired: Vec<Gene<A>> = Vec::with_capacity(candidates.len());
            for mut gene in candidates {
                if gene.fitness.is_none() {
                    gene.fitness = Some(self.fitness_calculator.fitness(&gene));
                }
                match self.non_solution_handler.handle(gene) {
                    Ok(mut gene) => {
                        // A repair that rewrote alleles cleared the cache.
                        if gene.fitness.is_none() {
                            gene.fitness = Some(self.fitness_calculator.fitness(&gene));
                        }
                        repaired.push(gene);
                    }
                    Err(SuddenDeath) => {
                        let pool_ref = replacement_pool
                            .get_or_insert_with(|| population.clone());
                        if pool_ref.is_empty() {
                            // Draws are without replacement within one pool
                            // copy; refill from the same pristine remainder.
                            if population.is_empty() {
                                return Err(SolverError::ReplacementPoolExhausted {
                                    generation: breeding,
                                });
                            }
                            *pool_ref = population.clone();
                        }
                        let idx = self.rng.random_range(0..pool_ref.len());
                        repaired.push(pool_ref.remove(idx));
                    }
                }
            }
            let candidates = repaired;

            if let Some(gen_best) = first_max(&candidates) {
                if fitness_of(gen_best) > fitness_of(&best) {
                    best = gen_best.clone();
                }
            }

            let mut next_population = self
                .survivor_selector
                .select_survivors(candidates, population_size);
            sort_desc(&mut next_population);
            if next_population.len() != population_size {
                return Err(SolverError::GenerationSizeMismatch {
                    generation: breeding,
                    required: population_size,
                    actual: next_population.len(),
                });
            }

            generation_cnt += 1;
            population = next_population;
            for gene in population.iter_mut() {
                gene.age += 1;
            }

            log::debug!(
                "generation {}: top fitness {:?}, best-ever {:?}",
                generation_cnt,
                population[0].fitness,
                best.fitness
            );
            self.renderer.append(&population, &best, generation_cnt);

            let terminated = self
                .terminator
                .should_terminate(&population, &best, generation_cnt);
            let cancelled = self.cancel.load(Ordering::Relaxed);
            if cancelled && !terminated {
                log::info!("cancellation observed after generation {generation_cnt}");
            }
            if terminated || cancelled {
                self.renderer.write()?;
                log::info!(
                    "terminated after generation {}: best fitness {:?}",
                    generation_cnt,
                    best.fitness
                );
                return Ok(best);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
