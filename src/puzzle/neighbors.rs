//! Neighborhood resolution over the 8-connected grid

use super::grid::{Cell, Grid, VarId};

/// In-bounds neighbors of `(row, col)`: at most 8, fewer on the boundary.
pub fn neighbor_positions(grid: &Grid, row: usize, col: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(8);

    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue; // Skip the cell itself
            }

            let r = row as isize + dr;
            let c = col as isize + dc;

            if r >= 0 && r < grid.height as isize && c >= 0 && c < grid.width as isize {
                neighbors.push((r as usize, c as usize));
            }
        }
    }

    neighbors
}

/// Variable ids of the unknown cells adjacent to `(row, col)`.
///
/// Clue neighbors are dropped: a clue cell is a constant, never a variable.
/// The result is ascending because ids follow the same row-major order as
/// the neighbor scan.
pub fn unknown_neighbor_vars(grid: &Grid, row: usize, col: usize) -> Vec<VarId> {
    neighbor_positions(grid, row, col)
        .into_iter()
        .filter_map(|(r, c)| match grid.get(r, c) {
            Cell::Unknown(var) => Some(var),
            Cell::Clue(_) => None,
        })
        .collect()
}
