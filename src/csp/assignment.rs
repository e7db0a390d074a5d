#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial and complete assignments of words to variables.

use crate::csp::dictionary::{Dictionary, WordId};
use crate::csp::puzzle::Puzzle;
use crate::csp::variable::VariableId;
use core::ops::Index;
use rustc_hash::FxHashSet;

/// Letters of a (partially) filled grid, `None` for cells no bound word covers.
pub type LetterGrid = Vec<Vec<Option<char>>>;

/// A mapping from variables to words, indexed by `VariableId`.
///
/// Search uses a single `Assignment` and mutates it in place with `bind` and
/// `unbind`, so it only ever reflects the bindings that are currently active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<Option<WordId>>);

impl Index<VariableId> for Assignment {
    type Output = Option<WordId>;

    fn index(&self, index: VariableId) -> &Self::Output {
        &self.0[index]
    }
}

impl Assignment {
    /// Creates an empty assignment over `num_variables` variables.
    #[must_use]
    pub fn new(num_variables: usize) -> Self {
        Self(vec![None; num_variables])
    }

    /// Binds `var` to `word`, replacing any previous binding.
    pub fn bind(&mut self, var: VariableId, word: WordId) {
        self.0[var] = Some(word);
    }

    /// Removes the binding of `var`, returning the word it was bound to.
    pub fn unbind(&mut self, var: VariableId) -> Option<WordId> {
        self.0[var].take()
    }

    /// The word bound to `var`, if any.
    #[must_use]
    pub fn get(&self, var: VariableId) -> Option<WordId> {
        self.0.get(var).copied().flatten()
    }

    /// Whether `var` is bound.
    #[must_use]
    pub fn is_assigned(&self, var: VariableId) -> bool {
        self.get(var).is_some()
    }

    /// Number of variables the assignment covers, bound or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the assignment covers no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bound variables.
    #[must_use]
    pub fn num_assigned(&self) -> usize {
        self.0.iter().filter(|w| w.is_some()).count()
    }

    /// Whether every variable is bound.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Iterates over `(variable, word)` for bound variables.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.map(|w| (var, w)))
    }

    /// Iterates over the unbound variables.
    pub fn unassigned(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.is_none().then_some(var))
    }

    /// Checks every constraint over the bound variables: each word has its
    /// variable's length, no word is used twice, and every pair of bound crossing
    /// variables agrees on the shared letter.
    #[must_use]
    pub fn is_consistent(&self, puzzle: &Puzzle, dictionary: &Dictionary) -> bool {
        let mut used = FxHashSet::default();

        for (var, word) in self.iter() {
            if dictionary[word].len() != puzzle.variable(var).length {
                return false;
            }

            if !used.insert(word) {
                return false;
            }

            for &other in puzzle.neighbors(var) {
                let Some(other_word) = self.get(other) else {
                    continue;
                };
                let Some((i, j)) = puzzle.overlap(var, other) else {
                    continue;
                };
                if dictionary.letter(word, i) != dictionary.letter(other_word, j) {
                    return false;
                }
            }
        }

        true
    }

    /// Checks whether binding `var` to `word` keeps an already consistent assignment
    /// consistent. Any existing binding of `var` itself is ignored.
    #[must_use]
    pub fn is_consistent_with(
        &self,
        var: VariableId,
        word: WordId,
        puzzle: &Puzzle,
        dictionary: &Dictionary,
    ) -> bool {
        if dictionary[word].len() != puzzle.variable(var).length {
            return false;
        }

        if self.iter().any(|(other, w)| other != var && w == word) {
            return false;
        }

        puzzle.neighbors(var).iter().all(|&other| {
            match (self.get(other), puzzle.overlap(var, other)) {
                (Some(other_word), Some((i, j))) => {
                    dictionary.letter(word, i) == dictionary.letter(other_word, j)
                }
                _ => true,
            }
        })
    }

    /// Lays the bound words out on the grid.
    #[must_use]
    pub fn letter_grid(&self, puzzle: &Puzzle, dictionary: &Dictionary) -> LetterGrid {
        let mut letters = vec![vec![None; puzzle.width()]; puzzle.height()];
        for (var, word) in self.iter() {
            let cells = puzzle.variable(var).cells();
            for ((row, col), &letter) in cells.zip(dictionary[word].letters()) {
                letters[row][col] = Some(letter);
            }
        }
        letters
    }
}
