//! Fatal error conditions of the solver.

use thiserror::Error;

/// A misassembled pipeline or a broken strategy contract.
///
/// Every variant is fatal and raised at the point of detection — these
/// indicate configuration problems to fix, not data problems to retry.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A mandatory strategy was not supplied to the builder.
    #[error("missing strategy: {0} must be supplied before build")]
    MissingStrategy(&'static str),

    /// The initial population generator produced no genes.
    #[error("initial population generator returned an empty population")]
    EmptyInitialPopulation,

    /// Survivor selection returned the wrong number of genes.
    ///
    /// `generation` is the 1-based index of the generation being bred.
    #[error("Generation {generation} size mismatch: required {required}, actual {actual}.")]
    GenerationSizeMismatch {
        generation: usize,
        required: usize,
        actual: usize,
    },

    /// A sudden-death rejection occurred with nothing to substitute: the
    /// previous generation's remainder was empty (elitism extracted the
    /// entire population).
    #[error(
        "replacement pool exhausted in generation {generation}: \
         the previous generation's remainder is empty"
    )]
    ReplacementPoolExhausted { generation: usize },

    /// The renderer failed to emit its output.
    #[error("renderer write failed: {0}")]
    Render(#[from] std::io::Error),
}
