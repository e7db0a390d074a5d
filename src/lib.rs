#![deny(missing_docs)]
//! This crate fills crossword grids by solving them as constraint satisfaction
//! problems: node consistency, AC-3 arc consistency and backtracking search.

/// The `csp` module implements the puzzle model, the consistency engine and the
/// backtracking solver.
pub mod csp;

/// The `crossword` module reads structure files and word lists, verifies
/// solutions and renders filled grids.
pub mod crossword;
