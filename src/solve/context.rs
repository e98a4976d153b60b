//! Immutable per-puzzle solving context

use crate::puzzle::constraints::ConstraintSet;
use crate::puzzle::grid::Grid;

/// Everything the solving strategies read: the grid and its derived
/// constraint set. Built once per puzzle and never mutated afterwards, so
/// concurrent solves over distinct puzzles cannot interfere.
#[derive(Debug, Clone)]
pub struct PuzzleContext {
    grid: Grid,
    constraints: ConstraintSet,
}

impl PuzzleContext {
    pub fn new(grid: Grid) -> Self {
        let constraints = ConstraintSet::build(&grid);
        Self { grid, constraints }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn variable_count(&self) -> usize {
        self.grid.variable_count()
    }
}
