//! Pluggable engine for generational evolutionary optimization.
//!
//! Evolves a fixed-size population of candidate solutions ([`gene::Gene`])
//! across discrete generations. Every decision point of the loop is a
//! strategy trait the caller implements or picks from the built-in set:
//!
//! - **Solver** ([`solver`]): the orchestrator — owns the generational
//!   control flow, the population-size and fitness-staleness invariants,
//!   best-ever tracking, constraint-repair substitution, and cooperative
//!   cancellation.
//! - **Strategy contracts** ([`solver`]): initialization, fitness, elitism,
//!   parent/survivor selection, crossover, mutation, constraint repair,
//!   termination, rendering.
//! - **Built-in operators** ([`operators`]): integer/binary generators,
//!   tournament/roulette/age selection, one-point/multi-point/uniform
//!   crossover, random-resetting/bit-flip/greedy-local-search mutation,
//!   pass-through/sudden-death repair.
//! - **Terminators** ([`termination`]): generation count, no-improvement,
//!   fitness degeneration.
//! - **Renderers** ([`render`]): stdout progress lines and a Wolfram
//!   `ListLinePlot` descriptor writer.
//!
//! # Architecture
//!
//! The engine is problem-agnostic: it contains no encoding beyond the
//! generic allele vector and no objective beyond "higher fitness is
//! better". Problems plug in at the trait seams; the engine never needs to
//! be modified to host a new domain.

pub mod gene;
pub mod operators;
pub mod render;
pub mod solver;
pub mod termination;
