#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Crossword slots.
//!
//! A `Variable` is a contiguous run of open cells in one direction, anchored at the
//! cell where the run starts. Variables are created once when the grid structure is
//! read and never change afterwards; the puzzle stores them in an arena and the rest
//! of the solver refers to them by `VariableId`.

use std::fmt::{Display, Formatter};

/// Index of a variable inside the puzzle's variable arena.
pub type VariableId = usize;

/// The direction a slot runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A crossword slot: `length` cells starting at `(row, col)` going `direction`.
///
/// Two variables are equal iff all four fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Direction of the run.
    pub direction: Direction,
    /// Number of cells in the run.
    pub length: usize,
}

impl Variable {
    /// Creates a new variable.
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Returns the grid coordinate of the `k`-th cell of this slot.
    ///
    /// `k` is not checked against `length`.
    #[must_use]
    pub const fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    /// Iterates over the coordinates of every cell in this slot, in order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let var = *self;
        (0..var.length).map(move |k| var.cell(k))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, self.direction, self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_across() {
        let var = Variable::new(1, 2, Direction::Across, 3);
        let cells: Vec<_> = var.cells().collect();
        assert_eq!(cells, vec![(1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_cells_down() {
        let var = Variable::new(0, 4, Direction::Down, 2);
        let cells: Vec<_> = var.cells().collect();
        assert_eq!(cells, vec![(0, 4), (1, 4)]);
    }

    #[test]
    fn test_equality_uses_all_fields() {
        let a = Variable::new(0, 0, Direction::Across, 3);
        assert_eq!(a, Variable::new(0, 0, Direction::Across, 3));
        assert_ne!(a, Variable::new(0, 0, Direction::Down, 3));
        assert_ne!(a, Variable::new(0, 0, Direction::Across, 4));
        assert_ne!(a, Variable::new(0, 1, Direction::Across, 3));
    }

    #[test]
    fn test_display() {
        let var = Variable::new(2, 5, Direction::Down, 4);
        assert_eq!(var.to_string(), "(2, 5) down : 4");
    }
}
