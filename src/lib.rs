//! Gem Hunter puzzle solver
//!
//! This library models a Minesweeper-style trap-hunting puzzle as
//! exact-count boolean constraints and solves it by backtracking search,
//! brute-force enumeration, or an external SAT oracle.

pub mod config;
pub mod error;
pub mod puzzle;
pub mod sat;
pub mod solve;
pub mod utils;

pub use config::{Settings, Strategy};
pub use error::PuzzleError;
pub use puzzle::{Cell, Grid};
pub use solve::{HuntProblem, Solution, SolveOutcome, SolveReport};

use anyhow::Result;

/// Solve the configured puzzle with the configured strategy.
pub fn solve_puzzle(settings: Settings) -> Result<SolveReport> {
    let problem = HuntProblem::new(settings)?;
    problem.solve()
}
