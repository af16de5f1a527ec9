//! Built-in strategy implementations.
//!
//! The out-of-the-box operator set for the solver's plug points:
//!
//! - [`generation`]: integer and binary initial-population generators
//! - [`elitism`]: top-K elite extraction (or none)
//! - [`selection`]: tournament, roulette, and age-based selection, each
//!   usable for both parent and survivor selection
//! - [`crossover`]: one-point, multi-point, and uniform two-parent crossover
//! - [`mutation`]: random-resetting, bit-flip, and greedy local search
//! - [`repair`]: pass-through and sudden-death constraint handlers
//!
//! Every stochastic operator owns its RNG and exposes a `with_seed` builder
//! for reproducible runs.

pub mod crossover;
pub mod elitism;
pub mod generation;
pub mod mutation;
pub mod repair;
pub mod selection;

pub use crossover::{MultiPointCrossoverer, OnePointCrossoverer, UniformCrossoverer};
pub use elitism::{EliteExtractor, NoElitism};
pub use generation::{BinaryPopulationGenerator, IntegerPopulationGenerator};
pub use mutation::{BitFlipMutator, GreedyLocalSearchMutator, RandomResettingMutator};
pub use repair::{PassThroughHandler, SuddenDeathHandler};
pub use selection::{AgeSelector, RouletteSelector, TournamentSelector};
