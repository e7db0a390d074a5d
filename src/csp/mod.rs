#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Crossword filling as a constraint satisfaction problem.
//!
//! Variables are the slots of the grid, domains are the dictionary words that may
//! fill them, and the constraints are word length, word uniqueness and agreement
//! of the letters at every crossing.

pub mod assignment;
pub mod backtracking;
pub mod consistency;
pub mod dictionary;
/// Per-variable candidate sets.
pub mod domain;
pub mod inference;
pub mod puzzle;
pub mod solver;
pub mod value_ordering;
pub mod variable;
pub mod variable_selection;
