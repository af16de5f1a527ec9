//! Wolfram-language plot-descriptor renderer.
//!
//! Accumulates per-generation (generation, min/max/median fitness) triples
//! and emits a `ListLinePlot[...]` document at `write()` time, suitable for
//! pasting into a Mathematica notebook:
//!
//! ```text
//! ListLinePlot[{
//! {{0, 1}, {1, 2}},
//! {{0, 3}, {1, 4}},
//! {{0, 2}, {1, 3}}},
//! AxesLabel->{"Generation", "Fitness"},
//! PlotLegends->{"Min", "Max", "Med"}]
//! ```

use crate::gene::Gene;
use crate::solver::Renderer;
use std::io::{self, Write};
use std::path::PathBuf;

/// Renders the run's fitness envelope as a Wolfram `ListLinePlot`
/// descriptor, written to a file or to stdout.
///
/// Relies on the population arriving sorted descending by fitness: the
/// series sample the last (min), first (max), and middle (median) genes.
pub struct WolframPlotRenderer {
    target: Option<PathBuf>,
    min: Vec<(usize, f64)>,
    max: Vec<(usize, f64)>,
    med: Vec<(usize, f64)>,
}

impl WolframPlotRenderer {
    /// Creates a renderer writing the document to stdout.
    pub fn to_stdout() -> Self {
        Self {
            target: None,
            min: Vec::new(),
            max: Vec::new(),
            med: Vec::new(),
        }
    }

    /// Creates a renderer writing the document to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Some(path.into()),
            ..Self::to_stdout()
        }
    }

    /// The accumulated plot document.
    pub fn document(&self) -> String {
        fn series(points: &[(usize, f64)]) -> String {
            points
                .iter()
                .map(|(g, v)| format!("{{{g}, {v}}}"))
                .collect::<Vec<_>>()
                .join(", ")
        }

        let mut doc = String::from("ListLinePlot[{\n");
        doc.push('{');
        doc.push_str(&series(&self.min));
        doc.push_str("},\n");
        doc.push('{');
        doc.push_str(&series(&self.max));
        doc.push_str("},\n");
        doc.push('{');
        doc.push_str(&series(&self.med));
        doc.push('}');
        doc.push_str("},\n");
        doc.push_str("AxesLabel->{\"Generation\", \"Fitness\"},\n");
        doc.push_str("PlotLegends->{\"Min\", \"Max\", \"Med\"}]\n");
        doc
    }
}

impl<A> Renderer<A> for WolframPlotRenderer {
    fn append(&mut self, population: &[Gene<A>], _best: &Gene<A>, generation_cnt: usize) {
        if population.is_empty() {
            return;
        }
        let fit = |g: &Gene<A>| g.fitness.unwrap_or(f64::NEG_INFINITY);
        self.min.push((generation_cnt, fit(&population[population.len() - 1])));
        self.max.push((generation_cnt, fit(&population[0])));
        self.med.push((generation_cnt, fit(&population[population.len() / 2])));
    }

    fn write(&mut self) -> io::Result<()> {
        let doc = self.document();
        match &self.target {
            Some(path) => std::fs::write(path, doc.as_bytes()),
            None => io::stdout().write_all(doc.as_bytes()),
        }
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
        g.fitness = Some(9.0);
        g
    }

    #[test]
    fn test_document_format() {
        let mut r = WolframPlotRenderer::to_stdout();
        // Populations sorted descending: max first, min last.
        r.append(&population(&[3.0, 2.0, 1.0]), &best(), 0);
        r.append(&population(&[4.0, 3.0, 2.0]), &best(), 1);

        let expected = "ListLinePlot[{\n\
                        {{0, 1}, {1, 2}},\n\
                        {{0, 3}, {1, 4}},\n\
                        {{0, 2}, {1, 3}}},\n\
                        AxesLabel->{\"Generation\", \"Fitness\"},\n\
                        PlotLegends->{\"Min\", \"Max\", \"Med\"}]\n";
        assert_eq!(r.document(), expected);
    }

    #[test]
    fn test_fractional_fitness_formatting() {
        let mut r = WolframPlotRenderer::to_stdout();
        r.append(&population(&[2.5, 1.25]), &best(), 0);
        assert!(r.document().contains("{{0, 1.25}}"));
        assert!(r.document().contains("{{0, 2.5}}"));
    }

    #[test]
    fn test_median_of_even_population() {
        let mut r = WolframPlotRenderer::to_stdout();
        // len 4: the median sample is index 2 (upper middle) of the
        // descending order.
        r.append(&population(&[8.0, 6.0, 4.0, 2.0]), &best(), 0);
        assert!(r.document().contains("{{0, 4}}"));
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join("evogen_wolfram_plot_test.m");
        let mut r = WolframPlotRenderer::to_file(&path);
        r.append(&population(&[2.0, 1.0]), &best(), 0);
        <WolframPlotRenderer as Renderer<i64>>::write(&mut r).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r.document());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_run_produces_empty_series() {
        let r = WolframPlotRenderer::to_stdout();
        let doc = r.document();
        assert!(doc.starts_with("ListLinePlot[{\n{},\n{},\n{}},\n"));
    }
}
