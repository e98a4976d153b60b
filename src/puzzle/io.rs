//! File I/O for puzzle and solution grids

use super::grid::Grid;
use crate::error::PuzzleError;
use anyhow::{Context, Result};
use std::path::Path;

/// Cell of a solved grid file: a clue digit, `T` (trap), or `G` (gem).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvedCell {
    Clue(u8),
    Trap,
    Gem,
}

/// Load a puzzle grid from a text file.
///
/// Format: one row per line, cells separated by whitespace (commas are
/// tolerated); a non-negative integer is a clue, `_` is an unknown cell.
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    let grid = parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle file: {}", path.as_ref().display()))?;
    Ok(grid)
}

/// Parse a puzzle grid from its string representation.
pub fn parse_grid_from_string(content: &str) -> Result<Grid, PuzzleError> {
    let mut rows = Vec::new();

    for (row_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in tokens(line) {
            match token {
                "_" => row.push(None),
                literal => {
                    let clue = literal.parse::<u8>().map_err(|_| {
                        PuzzleError::MalformedInput(format!(
                            "cell '{}' in row {} is neither a clue nor '_'",
                            literal, row_idx
                        ))
                    })?;
                    row.push(Some(clue));
                }
            }
        }
        rows.push(row);
    }

    Grid::from_rows(rows)
}

/// Load a solved grid (clue digits plus `T`/`G` labels) from a text file.
pub fn load_solved_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<SolvedCell>>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read solution file: {}", path.as_ref().display()))?;

    let rows = parse_solved_grid_from_string(&content)
        .with_context(|| format!("Failed to parse solution file: {}", path.as_ref().display()))?;
    Ok(rows)
}

/// Parse a solved grid from its string representation.
pub fn parse_solved_grid_from_string(content: &str) -> Result<Vec<Vec<SolvedCell>>, PuzzleError> {
    let mut rows = Vec::new();

    for (row_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in tokens(line) {
            match token {
                "T" => row.push(SolvedCell::Trap),
                "G" => row.push(SolvedCell::Gem),
                literal => {
                    let clue = literal.parse::<u8>().map_err(|_| {
                        PuzzleError::MalformedInput(format!(
                            "cell '{}' in row {} is neither a clue, 'T' nor 'G'",
                            literal, row_idx
                        ))
                    })?;
                    row.push(SolvedCell::Clue(clue));
                }
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(PuzzleError::MalformedInput(
            "solution file has no rows".to_string(),
        ));
    }

    Ok(rows)
}

/// Save a puzzle grid to a text file.
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid.to_string())
        .with_context(|| format!("Failed to write puzzle file: {}", path.as_ref().display()))?;
    Ok(())
}

/// Create example puzzle files used by the `setup` command.
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // 5x5 board with eleven unknowns and a unique trap layout.
    let example = "2 _ _ 1 _\n\
                   _ 5 4 2 _\n\
                   3 _ _ 2 1\n\
                   3 _ 6 _ 1\n\
                   2 _ _ 2 1\n";
    std::fs::write(dir.join("example.txt"), example).context("Failed to write example.txt")?;

    // Smallest interesting board: one clue over three unknowns.
    let pocket = "1 _\n_ _\n";
    std::fs::write(dir.join("pocket.txt"), pocket).context("Failed to write pocket.txt")?;

    // Single row where both clues pin the middle cell.
    let corridor = "1 _ 1\n";
    std::fs::write(dir.join("corridor.txt"), corridor).context("Failed to write corridor.txt")?;

    Ok(())
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}
