#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reader for crossword structure files.
//!
//! A structure file has one grid row per line. `_` marks a cell to be filled, any
//! other character a blocked cell. The grid is as wide as its longest line; shorter
//! lines are padded with blocked cells.

use crate::crossword::error::CrosswordError;
use crate::csp::puzzle::Puzzle;
use bit_vec::BitVec;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The character marking an open cell.
pub const OPEN_CELL: char = '_';

/// Parses a structure from `reader` and derives its variables and overlaps.
///
/// # Errors
///
/// `CrosswordError::Io` if reading fails, `CrosswordError::EmptyStructure` if the
/// input has no lines.
pub fn parse_structure<R: BufRead>(reader: R) -> Result<Puzzle, CrosswordError> {
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;

    let height = lines.len();
    if height == 0 {
        return Err(CrosswordError::EmptyStructure);
    }
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let mut structure = BitVec::from_elem(height * width, false);
    for (row, line) in lines.iter().enumerate() {
        for (col, cell) in line.chars().enumerate() {
            structure.set(row * width + col, cell == OPEN_CELL);
        }
    }

    let puzzle = Puzzle::from_structure(height, width, structure);
    debug!(
        "parsed {height}x{width} structure with {} variables",
        puzzle.num_variables()
    );
    Ok(puzzle)
}

/// Parses the structure file at `path`.
///
/// # Errors
///
/// See `parse_structure`; also fails if the file cannot be opened.
pub fn parse_structure_file(path: impl AsRef<Path>) -> Result<Puzzle, CrosswordError> {
    let file = File::open(path)?;
    parse_structure(BufReader::new(file))
}
