//! Grid representation for gem hunter puzzles

use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Solver variable identifier. Dense range `1..=V`, assigned row-major.
pub type VarId = i32;

/// A single puzzle cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Fixed count of traps among the cell's neighbors.
    Clue(u8),
    /// Undetermined cell, carrying its solver variable id.
    Unknown(VarId),
}

/// Rectangular puzzle grid.
///
/// Unknown cells receive variable ids in row-major traversal order at
/// construction time, so the mapping between ids and positions is fixed for
/// the lifetime of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
    var_positions: Vec<(usize, usize)>,
}

impl Grid {
    /// Build a grid from parsed rows; `None` marks an unknown cell.
    pub fn from_rows(rows: Vec<Vec<Option<u8>>>) -> Result<Self, PuzzleError> {
        if rows.is_empty() {
            return Err(PuzzleError::MalformedInput("grid has no rows".to_string()));
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            return Err(PuzzleError::MalformedInput(
                "grid rows cannot be empty".to_string(),
            ));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PuzzleError::MalformedInput(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut var_positions = Vec::new();

        for (row, entries) in rows.into_iter().enumerate() {
            for (col, entry) in entries.into_iter().enumerate() {
                match entry {
                    Some(clue) => cells.push(Cell::Clue(clue)),
                    None => {
                        let id = var_positions.len() as VarId + 1;
                        var_positions.push((row, col));
                        cells.push(Cell::Unknown(id));
                    }
                }
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            var_positions,
        })
    }

    /// Convert 2D coordinates to the flat cell index.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Cell at the given coordinates. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Number of unknown cells (solver variables).
    pub fn variable_count(&self) -> usize {
        self.var_positions.len()
    }

    /// Position of the unknown cell behind a variable id.
    pub fn variable_position(&self, var: VarId) -> Option<(usize, usize)> {
        if var < 1 {
            return None;
        }
        self.var_positions.get(var as usize - 1).copied()
    }

    /// Iterate clue cells as `(row, col, value)` in row-major order.
    pub fn clue_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| match cell {
            Cell::Clue(value) => Some((i / self.width, i % self.width, *value)),
            Cell::Unknown(_) => None,
        })
    }

    /// Number of clue cells.
    pub fn clue_count(&self) -> usize {
        self.clue_cells().count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.get(row, col) {
                    Cell::Clue(value) => write!(f, "{}", value)?,
                    Cell::Unknown(_) => write!(f, "_")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
