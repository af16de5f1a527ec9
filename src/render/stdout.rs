//! Line-per-generation stdout renderers.

use crate::gene::Gene;
use crate::solver::Renderer;
use std::fmt::Debug;
use std::io;

/// Prints the generation counter and the best-ever gene.
pub struct StdoutRenderer;

impl<A: Debug> Renderer<A> for StdoutRenderer {
    fn append(&mut self, _population: &[Gene<A>], best: &Gene<A>, generation_cnt: usize) {
        println!("Generation: {generation_cnt}, best: {best}");
    }

    fn write(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Prints the generation counter plus the population's max/min/median
/// fitness and the best-ever gene.
///
/// Relies on the population arriving sorted descending by fitness.
pub struct DetailedStdoutRenderer;

impl<A: Debug> Renderer<A> for DetailedStdoutRenderer {
    fn append(&mut self, population: &[Gene<A>], best: &Gene<A>, generation_cnt: usize) {
        if population.is_empty() {
            return;
        }
        let fit = |g: &Gene<A>| g.fitness.unwrap_or(f64::NEG_INFINITY);
        let maximum = fit(&population[0]);
        let minimum = fit(&population[population.len() - 1]);
        let median = fit(&population[population.len() / 2]);
        println!(
            "Generation: {generation_cnt}, max: {maximum}, min: {minimum}, \
             med: {median}, best: {best}"
        );
    }

    fn write(&mut self) -> io::Result<()> {
        Ok(())
    }
}
