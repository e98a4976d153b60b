//! Assignments, solve outcomes, and rendered solutions

use crate::error::PuzzleError;
use crate::puzzle::constraints::InfeasibleClue;
use crate::puzzle::grid::{Cell, Grid, VarId};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Final label of an unknown cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Trap,
    Gem,
}

/// Partial or total mapping from variable id to trap/gem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    marks: Vec<Option<Mark>>,
}

impl Assignment {
    /// Fresh assignment with every variable unassigned.
    pub fn new(variable_count: usize) -> Self {
        Self {
            marks: vec![None; variable_count],
        }
    }

    pub fn get(&self, var: VarId) -> Option<Mark> {
        self.marks[var as usize - 1]
    }

    pub fn set(&mut self, var: VarId, mark: Mark) {
        self.marks[var as usize - 1] = Some(mark);
    }

    pub fn clear(&mut self, var: VarId) {
        self.marks[var as usize - 1] = None;
    }

    /// True when no variable is unassigned.
    pub fn is_complete(&self) -> bool {
        self.marks.iter().all(|mark| mark.is_some())
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn trap_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|mark| **mark == Some(Mark::Trap))
            .count()
    }
}

/// Work counters reported by a strategy run. Diagnostic only; values for
/// counters a strategy does not use stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Tentative assignments made by backtracking search.
    pub nodes_visited: u64,
    /// Complete assignments checked by brute force.
    pub assignments_tested: u64,
    /// Clauses handed to the external oracle.
    pub clauses_submitted: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes visited: {}", self.nodes_visited)?;
        writeln!(f, "  Assignments tested: {}", self.assignments_tested)?;
        writeln!(f, "  Clauses submitted: {}", self.clauses_submitted)?;
        Ok(())
    }
}

/// Result of one strategy invocation: the success flag, the assignment when
/// one exists, and the elapsed wall time. Elapsed time never affects
/// control flow.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub satisfiable: bool,
    pub assignment: Option<Assignment>,
    pub elapsed: Duration,
    pub stats: SearchStats,
    /// Extra detail for negative verdicts.
    pub diagnostic: Option<String>,
}

impl SolveOutcome {
    pub fn satisfiable(assignment: Assignment, elapsed: Duration, stats: SearchStats) -> Self {
        Self {
            satisfiable: true,
            assignment: Some(assignment),
            elapsed,
            stats,
            diagnostic: None,
        }
    }

    pub fn unsatisfiable(elapsed: Duration, stats: SearchStats) -> Self {
        Self {
            satisfiable: false,
            assignment: None,
            elapsed,
            stats,
            diagnostic: None,
        }
    }

    /// Negative verdict issued before any search work: a clue can never be
    /// satisfied, so elapsed time and every counter stay zero.
    pub fn infeasible(clue: InfeasibleClue) -> Self {
        Self {
            satisfiable: false,
            assignment: None,
            elapsed: Duration::ZERO,
            stats: SearchStats::default(),
            diagnostic: Some(PuzzleError::from(clue).to_string()),
        }
    }
}

/// A complete assignment over its puzzle grid.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub grid: Grid,
    pub assignment: Assignment,
    pub trap_count: usize,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    pub fn new(grid: Grid, assignment: Assignment, solve_time: Duration) -> Self {
        debug_assert!(assignment.is_complete());
        let trap_count = assignment.trap_count();
        Self {
            grid,
            assignment,
            trap_count,
            solve_time,
        }
    }

    /// Render the final display grid: clue digits unchanged, unknown cells
    /// as `T` (trap) or `G` (gem).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.grid.height {
            for col in 0..self.grid.width {
                if col > 0 {
                    out.push(' ');
                }
                match self.grid.get(row, col) {
                    Cell::Clue(value) => out.push_str(&value.to_string()),
                    Cell::Unknown(var) => out.push(match self.assignment.get(var) {
                        Some(Mark::Trap) => 'T',
                        _ => 'G',
                    }),
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json().context("Failed to serialize solution")?;
        std::fs::write(&path, json).with_context(|| {
            format!("Failed to write solution file: {}", path.as_ref().display())
        })?;
        Ok(())
    }
}
