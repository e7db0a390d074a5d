#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The fixed geometry of a crossword.
//!
//! A `Puzzle` holds the grid dimensions, the occupancy bitmap, the arena of
//! variables, a dense `n x n` table of overlaps and, for each variable, the list of
//! variables it crosses. None of it changes once the puzzle has been built.

use crate::csp::variable::{Direction, Variable, VariableId};
use bit_vec::BitVec;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Offsets `(i, j)`: letter `i` of the first variable's word must equal letter `j`
/// of the second variable's word.
pub type Overlap = (usize, usize);

/// An ordered pair of variables `(x, y)` that share a cell.
pub type Arc = (VariableId, VariableId);

/// Crossword geometry: dimensions, open cells, slots and their crossings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    height: usize,
    width: usize,
    /// Row-major occupancy, `true` for open cells.
    structure: BitVec,
    variables: Vec<Variable>,
    /// Row-major `variables.len() x variables.len()` table.
    overlaps: Vec<Option<Overlap>>,
    neighbors: Vec<SmallVec<[VariableId; 8]>>,
}

impl Puzzle {
    /// Builds a puzzle from its occupancy bitmap, deriving the variables from it.
    ///
    /// Cells are scanned row-major. At each open cell a down slot starts if the cell
    /// above is blocked (or off the grid) and an across slot starts if the cell to the
    /// left is blocked (or off the grid). Runs shorter than two cells are not slots.
    ///
    /// # Panics
    ///
    /// If `structure.len() != height * width`.
    #[must_use]
    pub fn from_structure(height: usize, width: usize, structure: BitVec) -> Self {
        let variables = find_variables(height, width, &structure);
        Self::with_variables(height, width, structure, variables)
    }

    /// Builds a puzzle from its occupancy bitmap and an externally derived list of
    /// variables.
    ///
    /// # Panics
    ///
    /// If `structure.len() != height * width`, or if a variable covers a cell that
    /// is blocked or outside the grid.
    #[must_use]
    pub fn with_variables(
        height: usize,
        width: usize,
        structure: BitVec,
        variables: Vec<Variable>,
    ) -> Self {
        assert_eq!(
            structure.len(),
            height * width,
            "structure does not match grid dimensions"
        );
        for var in &variables {
            for (row, col) in var.cells() {
                assert!(
                    row < height && col < width && structure[row * width + col],
                    "variable {var:?} covers ({row}, {col}), which is not an open cell"
                );
            }
        }

        let overlaps = compute_overlaps(&variables);
        let n = variables.len();
        let neighbors = (0..n)
            .map(|x| (0..n).filter(|&y| overlaps[x * n + y].is_some()).collect())
            .collect();

        Self {
            height,
            width,
            structure,
            variables,
            overlaps,
            neighbors,
        }
    }

    /// Builds a puzzle from rows of occupancy flags. Short rows are padded with
    /// blocked cells up to the longest row.
    #[must_use]
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut structure = BitVec::from_elem(height * width, false);
        for (row, cells) in rows.iter().enumerate() {
            for (col, &open) in cells.iter().enumerate() {
                structure.set(row * width + col, open);
            }
        }
        Self::from_structure(height, width, structure)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether `(row, col)` is an open cell. Coordinates outside the grid are blocked.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.structure[row * self.width + col]
    }

    /// All variables, indexed by `VariableId`.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The variable with the given id.
    #[must_use]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id]
    }

    /// Number of variables.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Looks up the id of a variable.
    #[must_use]
    pub fn id_of(&self, var: &Variable) -> Option<VariableId> {
        self.variables.iter().position(|v| v == var)
    }

    /// The overlap between `x` and `y`, or `None` if they do not cross (or `x == y`).
    #[must_use]
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps[x * self.variables.len() + y]
    }

    /// Variables that cross `x`, sorted by id.
    #[must_use]
    pub fn neighbors(&self, x: VariableId) -> &[VariableId] {
        &self.neighbors[x]
    }

    /// Number of variables crossing `x`.
    #[must_use]
    pub fn degree(&self, x: VariableId) -> usize {
        self.neighbors[x].len()
    }

    /// Every ordered pair of variables with a defined overlap.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(x, ys)| ys.iter().map(move |&y| (x, y)))
    }
}

fn run_length(
    structure: &BitVec,
    width: usize,
    height: usize,
    start: (usize, usize),
    direction: Direction,
) -> usize {
    let (row, col) = start;
    match direction {
        Direction::Across => (col..width)
            .take_while(|&c| structure[row * width + c])
            .count(),
        Direction::Down => (row..height)
            .take_while(|&r| structure[r * width + col])
            .count(),
    }
}

fn find_variables(height: usize, width: usize, structure: &BitVec) -> Vec<Variable> {
    let open = |row: usize, col: usize| structure[row * width + col];
    let mut variables = Vec::new();

    for row in 0..height {
        for col in 0..width {
            if !open(row, col) {
                continue;
            }

            if row == 0 || !open(row - 1, col) {
                let length = run_length(structure, width, height, (row, col), Direction::Down);
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
            }

            if col == 0 || !open(row, col - 1) {
                let length = run_length(structure, width, height, (row, col), Direction::Across);
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
            }
        }
    }

    variables
}

fn compute_overlaps(variables: &[Variable]) -> Vec<Option<Overlap>> {
    let n = variables.len();
    let mut by_cell: FxHashMap<(usize, usize), SmallVec<[(VariableId, usize); 2]>> =
        FxHashMap::default();
    for (id, var) in variables.iter().enumerate() {
        for (offset, cell) in var.cells().enumerate() {
            by_cell.entry(cell).or_default().push((id, offset));
        }
    }

    let mut overlaps = vec![None; n * n];
    for (x, var) in variables.iter().enumerate() {
        for (i, cell) in var.cells().enumerate() {
            for &(y, j) in &by_cell[&cell] {
                if y != x && overlaps[x * n + y].is_none() {
                    overlaps[x * n + y] = Some((i, j));
                    overlaps[y * n + x] = Some((j, i));
                }
            }
        }
    }
    overlaps
}
