//! Strategy contracts consumed by the solver.
//!
//! Each plug point of the generational loop is one trait with a single call
//! operation. Concrete variants (tournament vs. roulette selection, one-point
//! vs. uniform crossover, …) are separate implementations chosen at solver
//! construction time — composition over a shared interface, no inheritance.
//!
//! All methods take `&mut self`: strategies are free to carry internal state
//! such as an owned RNG, a stagnation counter, or an accumulated plot series.
//!
//! Built-in implementations live in [`crate::operators`],
//! [`crate::termination`], and [`crate::render`].

use crate::gene::Gene;
use std::io;

/// Constraint-rejection signal raised by a [`NonSolutionHandler`].
///
/// Means "this candidate is unsalvageable": the solver substitutes a gene
/// drawn from the previous generation instead of retrying construction. This
/// is routine control flow under many problem encodings, not an error — it is
/// never surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuddenDeath;

/// Produces the initial population.
///
/// The output length fixes `population_size` for the whole run. The generator
/// may pre-populate fitness; genes left unscored are evaluated by the solver.
pub trait InitialPopulationGenerator<A> {
    /// Creates the generation-0 population.
    fn generate(&mut self) -> Vec<Gene<A>>;
}

/// Scores a gene. Higher is better.
///
/// Must be a pure function of the allele contents — the solver trusts a
/// gene's cached fitness, and the cache is invalidated only by allele writes.
pub trait FitnessCalculator<A> {
    /// Computes the fitness of `gene`.
    fn fitness(&self, gene: &Gene<A>) -> f64;
}

/// Splits the elite off the population, protecting it from mutation.
///
/// The extractor owns the decision of what counts as elite; the solver only
/// relays the split. An empty elite (no elitism) is valid.
pub trait ElitismExtractor<A> {
    /// Removes and returns a prefix of `population` (typically the top-K by
    /// fitness; the population arrives sorted descending). What remains in
    /// `population` is the non-elite remainder.
    fn extract(&mut self, population: &mut Vec<Gene<A>>) -> Vec<Gene<A>>;
}

/// Chooses the parents that breed the next generation.
pub trait ParentSelector<A> {
    /// Selects parents from `pool` (elite ∪ remainder). How many is the
    /// selector's own decision; breeding needs at least two.
    fn select_parents(&mut self, pool: &[Gene<A>]) -> Vec<Gene<A>>;
}

/// Chooses which candidates populate the next generation.
pub trait SurvivorSelector<A> {
    /// Selects exactly `count` survivors from `candidates`
    /// (elite ∪ offspring ∪ mutated remainder). Returning any other
    /// cardinality is a fatal configuration error.
    fn select_survivors(&mut self, candidates: Vec<Gene<A>>, count: usize) -> Vec<Gene<A>>;
}

/// Recombines parents into offspring.
pub trait Crossoverer<A> {
    /// Produces offspring from `parents`. `pool` is the full pre-extraction
    /// population (elite ∪ remainder), passed read-only; the result must be
    /// sized to fill a generation, i.e. `pool.len()` offspring. Two-parent
    /// recombination is the expected base case; sampling parents with
    /// replacement between offspring groups is permitted.
    fn crossover(&mut self, parents: &[Gene<A>], pool: &[Gene<A>]) -> Vec<Gene<A>>;
}

/// Perturbs genes after crossover.
pub trait Mutator<A> {
    /// Mutates `genes`, preserving cardinality. By-value in, by-value out:
    /// implementations may mutate in place and return the same vector, or
    /// build a new one.
    fn mutate(&mut self, genes: Vec<Gene<A>>) -> Vec<Gene<A>>;
}

/// Repairs or rejects candidates that violate problem constraints.
pub trait NonSolutionHandler<A> {
    /// Returns the (possibly repaired) gene, or [`SuddenDeath`] if the
    /// candidate is unsalvageable. A repair that rewrites alleles clears the
    /// gene's fitness cache, and the solver re-evaluates it afterwards —
    /// handlers do not need their own fitness plumbing.
    fn handle(&mut self, gene: Gene<A>) -> Result<Gene<A>, SuddenDeath>;
}

/// Stopping-condition predicate, evaluated once per generation.
pub trait Terminator<A> {
    /// Returns `true` to stop the run. `population` is the freshly selected
    /// generation (sorted descending by fitness), `best` the best-ever gene,
    /// `generation_cnt` the 1-based index of the generation just bred.
    /// Stateful terminators (no-improvement counters and the like) retain
    /// their state across calls.
    fn should_terminate(
        &mut self,
        population: &[Gene<A>],
        best: &Gene<A>,
        generation_cnt: usize,
    ) -> bool;
}

/// Progress sink, fed once per generation and finalized once at termination.
pub trait Renderer<A> {
    /// Records one generation. Called with the initial population
    /// (`generation_cnt` 0) and after each bred generation.
    fn append(&mut self, population: &[Gene<A>], best: &Gene<A>, generation_cnt: usize);

    /// Emits the accumulated output. Called exactly once, on termination.
    fn write(&mut self) -> io::Result<()>;
}
