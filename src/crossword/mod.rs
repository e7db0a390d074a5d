#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Loading crosswords from disk, checking solutions and rendering them.

/// Errors for loading, verifying and saving.
pub mod error;
/// Text rendering of filled grids.
pub mod render;
/// Structure file parsing.
pub mod structure;
/// Word list parsing.
pub mod words;

use crate::crossword::error::CrosswordError;
use crate::csp::assignment::Assignment;
use crate::csp::dictionary::Dictionary;
use crate::csp::puzzle::Puzzle;
use std::path::Path;

/// A puzzle together with the words it may be filled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    /// The grid geometry.
    pub puzzle: Puzzle,
    /// The candidate words.
    pub dictionary: Dictionary,
}

impl Crossword {
    /// Loads a structure file and a word list.
    ///
    /// # Errors
    ///
    /// Any error from `structure::parse_structure_file` or `words::parse_words_file`.
    pub fn load(
        structure: impl AsRef<Path>,
        words: impl AsRef<Path>,
    ) -> Result<Self, CrosswordError> {
        Ok(Self {
            puzzle: structure::parse_structure_file(structure)?,
            dictionary: words::parse_words_file(words)?,
        })
    }

    /// Checks that `assignment` binds every variable and satisfies every constraint.
    ///
    /// # Errors
    ///
    /// `CrosswordError::VerificationFailed` describing the first problem found.
    pub fn verify(&self, assignment: &Assignment) -> Result<(), CrosswordError> {
        if assignment.len() != self.puzzle.num_variables() {
            return Err(CrosswordError::VerificationFailed(format!(
                "assignment covers {} variables, puzzle has {}",
                assignment.len(),
                self.puzzle.num_variables()
            )));
        }

        if let Some(var) = assignment.unassigned().next() {
            return Err(CrosswordError::VerificationFailed(format!(
                "{} is unassigned",
                self.puzzle.variable(var)
            )));
        }

        if !assignment.is_consistent(&self.puzzle, &self.dictionary) {
            return Err(CrosswordError::VerificationFailed(
                "assignment violates a length, uniqueness or overlap constraint".to_string(),
            ));
        }

        Ok(())
    }
}
