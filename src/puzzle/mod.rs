//! Puzzle model: grid, neighborhoods, and derived constraints

pub mod constraints;
pub mod grid;
pub mod io;
pub mod neighbors;

pub use constraints::{Constraint, ConstraintSet, InfeasibleClue};
pub use grid::{Cell, Grid, VarId};
pub use io::{load_grid_from_file, parse_grid_from_string, save_grid_to_file};
