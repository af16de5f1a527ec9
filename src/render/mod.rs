//! Progress renderers.
//!
//! A renderer receives every generation through `append` and emits its
//! accumulated output exactly once through `write`, when the run terminates.
//! The solver defaults to [`NoopRenderer`].

mod stdout;
mod wolfram;

pub use stdout::{DetailedStdoutRenderer, StdoutRenderer};
pub use wolfram::WolframPlotRenderer;

use crate::gene::Gene;
use crate::solver::Renderer;
use std::io;

/// Discards everything. The default renderer.
pub struct NoopRenderer;

impl<A> Renderer<A> for NoopRenderer {
    fn append(&mut self, _population: &[Gene<A>], _best: &Gene<A>, _generation_cnt: usize) {}

    fn write(&mut self) -> io::Result<()> {
        Ok(())
    }
}
