#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::csp::dictionary::{Dictionary, WordId};
use crate::csp::variable::VariableId;
use std::ops::{Index, IndexMut};

/// The remaining candidate words of every variable, indexed by `VariableId`.
///
/// Each domain keeps the dictionary's insertion order and never holds a word twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domains(Vec<Vec<WordId>>);

impl Index<VariableId> for Domains {
    type Output = Vec<WordId>;

    fn index(&self, index: VariableId) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<VariableId> for Domains {
    fn index_mut(&mut self, index: VariableId) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl From<Vec<Vec<WordId>>> for Domains {
    fn from(domains: Vec<Vec<WordId>>) -> Self {
        Self(domains)
    }
}

impl Domains {
    /// Every variable starts with every dictionary word.
    #[must_use]
    pub fn full(num_variables: usize, dictionary: &Dictionary) -> Self {
        let all: Vec<WordId> = dictionary.ids().collect();
        Self(vec![all; num_variables])
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of candidates left for `var`.
    #[must_use]
    pub fn size(&self, var: VariableId) -> usize {
        self.0[var].len()
    }

    /// Whether `word` is still a candidate for `var`.
    #[must_use]
    pub fn contains(&self, var: VariableId, word: WordId) -> bool {
        self.0[var].contains(&word)
    }

    /// Keeps only the candidates of `var` for which `keep` returns true. Returns the
    /// number of removed candidates.
    pub fn retain(&mut self, var: VariableId, keep: impl FnMut(&WordId) -> bool) -> usize {
        let before = self.0[var].len();
        self.0[var].retain(keep);
        before - self.0[var].len()
    }

    /// Reduces the domain of `var` to the single candidate `word`.
    pub fn restrict(&mut self, var: VariableId, word: WordId) {
        self.0[var].clear();
        self.0[var].push(word);
    }

    /// Total number of candidates across all variables.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    /// Iterates over `(variable, candidates)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &[WordId])> {
        self.0.iter().map(Vec::as_slice).enumerate()
    }
}
