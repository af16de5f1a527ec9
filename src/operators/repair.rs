//! Constraint repair handlers.
//!
//! A handler inspects every scored candidate and either passes it through
//! (possibly repaired) or rejects it with [`SuddenDeath`], in which case the
//! solver substitutes a gene from the previous generation instead.

use crate::gene::Gene;
use crate::solver::{NonSolutionHandler, SuddenDeath};

/// Accepts every candidate unchanged. The handler to use for unconstrained
/// problems.
pub struct PassThroughHandler;

impl<A> NonSolutionHandler<A> for PassThroughHandler {
    fn handle(&mut self, gene: Gene<A>) -> Result<Gene<A>, SuddenDeath> {
        Ok(gene)
    }
}

/// Rejects every candidate.
///
/// Forces the solver to rebuild each generation entirely from the previous
/// generation's remainder — mostly useful for exercising the substitution
/// path and for encodings where breeding never yields feasible solutions.
pub struct SuddenDeathHandler;

impl<A> NonSolutionHandler<A> for SuddenDeathHandler {
    fn handle(&mut self, _gene: Gene<A>) -> Result<Gene<A>, SuddenDeath> {
        Err(SuddenDeath)
    }
}
