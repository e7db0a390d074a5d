#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for ordering the candidates of the variable being branched on.
//!
//! - `LeastConstrainingValue`: ascending by the number of candidates each word
//!   would rule out in the domains of the variable's unassigned neighbours. Ties keep
//!   domain order. When every neighbour is already assigned the domain is returned
//!   unchanged.
//! - `DomainOrder`: the domain as stored.
//! - `Shuffled`: a random permutation of the domain, from a seedable generator.

use crate::csp::assignment::Assignment;
use crate::csp::dictionary::{Dictionary, WordId};
use crate::csp::domain::Domains;
use crate::csp::puzzle::Puzzle;
use crate::csp::variable::VariableId;
use clap::ValueEnum;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Display, Formatter};

/// Orders the candidates of a variable for search.
pub trait ValueOrdering: Debug + Clone + Default {
    /// Returns the candidates of `var` in the order they should be tried.
    fn order(
        &mut self,
        var: VariableId,
        puzzle: &Puzzle,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<WordId>;
}

/// Least constraining value first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastConstrainingValue;

/// For every unassigned neighbour of a variable: the offset of the crossing in the
/// variable's word, the neighbour's domain size, and how many of its candidates
/// carry each letter at the crossing.
struct CrossingLetters(Vec<(usize, usize, FxHashMap<Option<char>, usize>)>);

impl CrossingLetters {
    fn new(
        var: VariableId,
        puzzle: &Puzzle,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Self {
        Self(
            puzzle
                .neighbors(var)
                .iter()
                .filter(|&&n| !assignment.is_assigned(n))
                .filter_map(|&n| puzzle.overlap(var, n).map(|overlap| (n, overlap)))
                .map(|(n, (i, j))| {
                    let counts = domains[n]
                        .iter()
                        .map(|&other| dictionary.letter(other, j))
                        .counts()
                        .into_iter()
                        .collect();
                    (i, domains.size(n), counts)
                })
                .collect(),
        )
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A word rules out every candidate that does not carry its letter.
    fn eliminations(&self, word: WordId, dictionary: &Dictionary) -> usize {
        self.0
            .iter()
            .map(|(i, size, counts)| {
                size - counts.get(&dictionary.letter(word, *i)).copied().unwrap_or(0)
            })
            .sum()
    }
}

impl LeastConstrainingValue {
    /// Number of candidates `word` (placed in `var`) rules out across the unassigned
    /// neighbours of `var`. This is the key `order` sorts by.
    #[must_use]
    pub fn eliminations(
        var: VariableId,
        word: WordId,
        puzzle: &Puzzle,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> usize {
        CrossingLetters::new(var, puzzle, dictionary, domains, assignment)
            .eliminations(word, dictionary)
    }
}

impl ValueOrdering for LeastConstrainingValue {
    fn order(
        &mut self,
        var: VariableId,
        puzzle: &Puzzle,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        let crossings = CrossingLetters::new(var, puzzle, dictionary, domains, assignment);
        if crossings.is_empty() {
            return domains[var].clone();
        }

        domains[var]
            .iter()
            .copied()
            .sorted_by_cached_key(|&word| crossings.eliminations(word, dictionary))
            .collect()
    }
}

/// Candidates in domain order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainOrder;

impl ValueOrdering for DomainOrder {
    fn order(
        &mut self,
        var: VariableId,
        _: &Puzzle,
        _: &Dictionary,
        domains: &Domains,
        _: &Assignment,
    ) -> Vec<WordId> {
        domains[var].clone()
    }
}

/// Candidates in random order.
#[derive(Debug, Clone)]
pub struct Shuffled {
    rng: fastrand::Rng,
}

impl Shuffled {
    /// Creates a shuffler whose permutations are reproducible for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for Shuffled {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl ValueOrdering for Shuffled {
    fn order(
        &mut self,
        var: VariableId,
        _: &Puzzle,
        _: &Dictionary,
        domains: &Domains,
        _: &Assignment,
    ) -> Vec<WordId> {
        let mut values = domains[var].clone();
        self.rng.shuffle(&mut values);
        values
    }
}

/// Runtime choice between the value ordering strategies.
#[derive(Debug, Clone)]
pub enum ValueOrderingImpls {
    /// See `LeastConstrainingValue`.
    LeastConstrainingValue(LeastConstrainingValue),
    /// See `DomainOrder`.
    DomainOrder(DomainOrder),
    /// See `Shuffled`.
    Shuffled(Shuffled),
}

impl Default for ValueOrderingImpls {
    fn default() -> Self {
        Self::LeastConstrainingValue(LeastConstrainingValue)
    }
}

impl ValueOrdering for ValueOrderingImpls {
    fn order(
        &mut self,
        var: VariableId,
        puzzle: &Puzzle,
        dictionary: &Dictionary,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        match self {
            Self::LeastConstrainingValue(o) => {
                o.order(var, puzzle, dictionary, domains, assignment)
            }
            Self::DomainOrder(o) => o.order(var, puzzle, dictionary, domains, assignment),
            Self::Shuffled(o) => o.order(var, puzzle, dictionary, domains, assignment),
        }
    }
}

/// Names of the value ordering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueOrderingType {
    /// Least constraining value first.
    #[default]
    Lcv,
    /// Domain order.
    Domain,
    /// Random order.
    Shuffled,
}

impl Display for ValueOrderingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lcv => write!(f, "lcv"),
            Self::Domain => write!(f, "domain"),
            Self::Shuffled => write!(f, "shuffled"),
        }
    }
}

impl ValueOrderingType {
    /// Builds the strategy this name refers to. `seed` only affects `Shuffled`; without
    /// one the shuffler is seeded randomly.
    #[must_use]
    pub fn to_impl(self, seed: Option<u64>) -> ValueOrderingImpls {
        match self {
            Self::Lcv => ValueOrderingImpls::LeastConstrainingValue(LeastConstrainingValue),
            Self::Domain => ValueOrderingImpls::DomainOrder(DomainOrder),
            Self::Shuffled => ValueOrderingImpls::Shuffled(
                seed.map_or_else(Shuffled::default, Shuffled::with_seed),
            ),
        }
    }
}
