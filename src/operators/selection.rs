//! Parent and survivor selection strategies.
//!
//! Every selector here implements both [`ParentSelector`] and
//! [`SurvivorSelector`]: the mechanics are the same, only the target count
//! differs (the selector's own configured count for parents, the solver's
//! population size for survivors).
//!
//! Shared mechanics: the pool is copied, sorted ascending by fitness, the top
//! `elitism` genes are reserved unconditionally, and the remaining picks are
//! drawn one at a time without replacement by the strategy-specific rule.
//! The reserved slice is what guarantees the current best survive a
//! survivor-selection round regardless of draw luck.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::gene::Gene;
use crate::solver::{ParentSelector, SurvivorSelector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn fitness_of<A>(gene: &Gene<A>) -> f64 {
    gene.fitness.unwrap_or(f64::NEG_INFINITY)
}

/// Copies `pool`, reserves the `elitism` fittest, then draws the remaining
/// `count - elitism` picks without replacement via `choose`.
fn draw_selection<A: Clone>(
    pool: &[Gene<A>],
    count: usize,
    elitism: usize,
    rng: &mut StdRng,
    mut choose: impl FnMut(&[Gene<A>], &mut StdRng) -> usize,
) -> Vec<Gene<A>> {
    let count = count.min(pool.len());
    let elitism = elitism.min(count);

    let mut pool: Vec<Gene<A>> = pool.to_vec();
    pool.sort_by(|a, b| {
        fitness_of(a)
            .partial_cmp(&fitness_of(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Ascending sort: the elite are the tail.
    let mut selected = pool.split_off(pool.len() - elitism);
    for _ in 0..count - elitism {
        let idx = choose(&pool, rng);
        selected.push(pool.remove(idx));
    }
    selected
}

fn tournament_draw<A>(pool: &[Gene<A>], tournament_size: usize, rng: &mut StdRng) -> usize {
    let k = tournament_size.clamp(1, pool.len());
    let ids = rand::seq::index::sample(rng, pool.len(), k);
    let mut best = ids.index(0);
    for j in 1..ids.len() {
        let i = ids.index(j);
        if fitness_of(&pool[i]) > fitness_of(&pool[best]) {
            best = i;
        }
    }
    best
}

/// Fitness-proportionate draw over positive-fitness genes; uniform when no
/// gene has positive fitness.
fn roulette_draw<A>(pool: &[Gene<A>], rng: &mut StdRng) -> usize {
    let total: f64 = pool.iter().map(|g| fitness_of(g).max(0.0)).sum();
    if total <= 0.0 {
        return rng.random_range(0..pool.len());
    }
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, gene) in pool.iter().enumerate() {
        cumulative += fitness_of(gene).max(0.0);
        if cumulative > threshold {
            return i;
        }
    }
    pool.len() - 1 // floating-point fallback
}

fn youngest_draw<A>(pool: &[Gene<A>]) -> usize {
    let mut youngest = 0;
    for (i, gene) in pool.iter().enumerate() {
        if gene.age < pool[youngest].age {
            youngest = i;
        }
    }
    youngest
}

/// Tournament selection: each draw samples `tournament_size` distinct genes
/// and takes the fittest.
///
/// Higher tournament size means stronger selection pressure; 2–5 is the
/// usual range, 1 degenerates to a uniform draw.
pub struct TournamentSelector {
    count: usize,
    elitism: usize,
    tournament_size: usize,
    rng: StdRng,
}

impl TournamentSelector {
    /// Creates a selector producing `count` parents (when used as a
    /// [`ParentSelector`]), reserving the `elitism` fittest unconditionally.
    ///
    /// # Panics
    /// Panics if `count < 2` (a generation cannot be bred from fewer than
    /// two parents) or `tournament_size == 0`.
    pub fn new(count: usize, elitism: usize, tournament_size: usize) -> Self {
        assert!(count >= 2, "cannot breed a generation from fewer than 2 parents");
        assert!(tournament_size >= 1, "tournament size must be at least 1");
        Self {
            count,
            elitism,
            tournament_size,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the selector's RNG for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<A: Clone> ParentSelector<A> for TournamentSelector {
    fn select_parents(&mut self, pool: &[Gene<A>]) -> Vec<Gene<A>> {
        let k = self.tournament_size;
        draw_selection(pool, self.count, self.elitism, &mut self.rng, |p, rng| {
            tournament_draw(p, k, rng)
        })
    }
}

impl<A: Clone> SurvivorSelector<A> for TournamentSelector {
    fn select_survivors(&mut self, candidates: Vec<Gene<A>>, count: usize) -> Vec<Gene<A>> {
        let k = self.tournament_size;
        draw_selection(&candidates, count, self.elitism, &mut self.rng, |p, rng| {
            tournament_draw(p, k, rng)
        })
    }
}

/// Roulette-wheel (fitness-proportionate) selection.
///
/// Selection probability is proportional to fitness, so this assumes a
/// non-negative fitness scale; genes at or below zero fitness are only
/// reachable through the uniform fallback when the whole pool is
/// non-positive.
///
/// **Warning**: susceptible to super-individual dominance when fitness
/// variance is high.
pub struct RouletteSelector {
    count: usize,
    elitism: usize,
    rng: StdRng,
}

impl RouletteSelector {
    /// Creates a selector producing `count` parents, reserving the `elitism`
    /// fittest unconditionally.
    ///
    /// # Panics
    /// Panics if `count < 2`.
    pub fn new(count: usize, elitism: usize) -> Self {
        assert!(count >= 2, "cannot breed a generation from fewer than 2 parents");
        Self {
            count,
            elitism,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the selector's RNG for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<A: Clone> ParentSelector<A> for RouletteSelector {
    fn select_parents(&mut self, pool: &[Gene<A>]) -> Vec<Gene<A>> {
        draw_selection(pool, self.count, self.elitism, &mut self.rng, roulette_draw)
    }
}

impl<A: Clone> SurvivorSelector<A> for RouletteSelector {
    fn select_survivors(&mut self, candidates: Vec<Gene<A>>, count: usize) -> Vec<Gene<A>> {
        draw_selection(&candidates, count, self.elitism, &mut self.rng, roulette_draw)
    }
}

/// Age-based selection: each draw takes the youngest gene remaining.
///
/// Favors fresh genetic material over convergence pressure; pair with a
/// nonzero `elitism` so the best genes are not aged out.
pub struct AgeSelector {
    count: usize,
    elitism: usize,
    rng: StdRng,
}

impl AgeSelector {
    /// Creates a selector producing `count` parents, reserving the `elitism`
    /// fittest unconditionally.
    ///
    /// # Panics
    /// Panics if `count < 2`.
    pub fn new(count: usize, elitism: usize) -> Self {
        assert!(count >= 2, "cannot breed a generation from fewer than 2 parents");
        Self {
            count,
            elitism,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the selector's RNG (only used by the shared draw loop; the age
    /// rule itself is deterministic).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<A: Clone> ParentSelector<A> for AgeSelector {
    fn select_parents(&mut self, pool: &[Gene<A>]) -> Vec<Gene<A>> {
        draw_selection(pool, self.count, self.elitism, &mut self.rng, |p, _| {
            youngest_draw(p)
        })
    }
}

impl<A: Clone> SurvivorSelector<A> for AgeSelector {
    fn select_survivors(&mut self, candidates: Vec<Gene<A>>, count: usize) -> Vec<Gene<A>> {
        draw_selection(&candidates, count, self.elitism, &mut self.rng, |p, _| {
            youngest_draw(p)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
