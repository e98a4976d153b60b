//! Independent solution checking

use super::solution::{Assignment, Mark};
use crate::error::PuzzleError;
use crate::puzzle::grid::{Cell, Grid};
use crate::puzzle::io::SolvedCell;
use crate::puzzle::neighbors::neighbor_positions;
use std::fmt;

/// Re-checks a completed assignment against every clue, independently of
/// whichever strategy produced it.
pub struct SolutionValidator;

/// One clue whose neighborhood does not add up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueViolation {
    pub row: usize,
    pub col: usize,
    pub expected: usize,
    pub actual: usize,
}

/// Result of validating one assignment.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub clues_checked: usize,
    pub violations: Vec<ClueViolation>,
}

impl SolutionValidator {
    /// Count the trap neighbors of every clue cell and compare with its
    /// value. Unassigned variables count as gems.
    pub fn validate(grid: &Grid, assignment: &Assignment) -> ValidationResult {
        let mut violations = Vec::new();
        let mut clues_checked = 0;

        for (row, col, value) in grid.clue_cells() {
            clues_checked += 1;
            let actual = neighbor_positions(grid, row, col)
                .into_iter()
                .filter(|&(r, c)| match grid.get(r, c) {
                    Cell::Unknown(var) => assignment.get(var) == Some(Mark::Trap),
                    Cell::Clue(_) => false,
                })
                .count();

            if actual != value as usize {
                violations.push(ClueViolation {
                    row,
                    col,
                    expected: value as usize,
                    actual,
                });
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            clues_checked,
            violations,
        }
    }

    /// Align a solved grid file with its puzzle and recover the assignment
    /// it encodes. Shape and clue cells must match the puzzle exactly.
    pub fn assignment_from_solved_rows(
        grid: &Grid,
        rows: &[Vec<SolvedCell>],
    ) -> Result<Assignment, PuzzleError> {
        if rows.len() != grid.height || rows.iter().any(|row| row.len() != grid.width) {
            return Err(PuzzleError::MalformedInput(format!(
                "solution shape does not match the {}x{} puzzle",
                grid.height, grid.width
            )));
        }

        let mut assignment = Assignment::new(grid.variable_count());

        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match (grid.get(row, col), *cell) {
                    (Cell::Clue(expected), SolvedCell::Clue(found)) if expected == found => {}
                    (Cell::Clue(expected), _) => {
                        return Err(PuzzleError::MalformedInput(format!(
                            "cell ({}, {}) must repeat clue {}",
                            row, col, expected
                        )));
                    }
                    (Cell::Unknown(var), SolvedCell::Trap) => assignment.set(var, Mark::Trap),
                    (Cell::Unknown(var), SolvedCell::Gem) => assignment.set(var, Mark::Gem),
                    (Cell::Unknown(_), SolvedCell::Clue(_)) => {
                        return Err(PuzzleError::MalformedInput(format!(
                            "cell ({}, {}) must be labeled T or G",
                            row, col
                        )));
                    }
                }
            }
        }

        Ok(assignment)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "All {} clue(s) satisfied exactly", self.clues_checked)
        } else {
            writeln!(f, "{} clue(s) violated:", self.violations.len())?;
            for violation in &self.violations {
                writeln!(
                    f,
                    "  ({}, {}): expected {} trap(s), found {}",
                    violation.row, violation.col, violation.expected, violation.actual
                )?;
            }
            Ok(())
        }
    }
}
