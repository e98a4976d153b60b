//! Error taxonomy for puzzle construction and solving

use thiserror::Error;

/// Errors surfaced before or instead of a solving verdict.
///
/// Unsatisfiability is not an error: strategies report it through
/// [`SolveOutcome`](crate::solve::SolveOutcome). The variants here cover
/// structural input problems and refused work.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// Structural problem in the input grid (ragged rows, bad token).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A clue demands more traps than it has unknown neighbors.
    #[error("clue {clue} at ({row}, {col}) exceeds its {available} unknown neighbor(s)")]
    ClueExceedsNeighbors {
        row: usize,
        col: usize,
        clue: usize,
        available: usize,
    },

    /// Brute-force enumeration was refused before doing any work.
    #[error("{variables} unknown cells exceed the brute-force ceiling of {ceiling}")]
    ResourceExceeded { variables: usize, ceiling: usize },
}
