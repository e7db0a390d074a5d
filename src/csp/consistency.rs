#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Domain filtering before (and optionally during) search.
//!
//! Two filters are provided:
//! 1.  **Node consistency:** every candidate must have the length of its slot.
//! 2.  **Arc consistency (AC-3):** every candidate of `x` must agree with at least
//!     one candidate of each crossing `y` on the shared letter. A FIFO queue of arcs
//!     is revised until it drains; whenever a domain shrinks, the arcs pointing at
//!     it are queued again. If any domain becomes empty the puzzle cannot be filled
//!     and enforcement stops with `false`.
//!
//! Both filters mutate the domains in place and are idempotent: running them again
//! on domains they already made consistent removes nothing.

use crate::csp::dictionary::Dictionary;
use crate::csp::domain::Domains;
use crate::csp::puzzle::{Arc, Puzzle};
use crate::csp::variable::VariableId;
use log::trace;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Counters describing the work done by a `ConsistencyEngine`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsistencyStats {
    /// Values removed by node consistency.
    pub node_pruned: usize,
    /// Arcs taken off the AC-3 queue.
    pub arcs_processed: usize,
    /// Revisions that removed at least one value.
    pub revisions: usize,
    /// Values removed by arc consistency.
    pub arc_pruned: usize,
}

/// Enforces node and arc consistency over a set of domains for one puzzle.
#[derive(Debug, Clone)]
pub struct ConsistencyEngine<'a> {
    puzzle: &'a Puzzle,
    dictionary: &'a Dictionary,
    stats: ConsistencyStats,
}

impl<'a> ConsistencyEngine<'a> {
    /// Creates an engine for `puzzle` whose domains hold ids from `dictionary`.
    #[must_use]
    pub const fn new(puzzle: &'a Puzzle, dictionary: &'a Dictionary) -> Self {
        Self {
            puzzle,
            dictionary,
            stats: ConsistencyStats {
                node_pruned: 0,
                arcs_processed: 0,
                revisions: 0,
                arc_pruned: 0,
            },
        }
    }

    /// The puzzle this engine works on.
    #[must_use]
    pub const fn puzzle(&self) -> &'a Puzzle {
        self.puzzle
    }

    /// Work done so far.
    #[must_use]
    pub const fn stats(&self) -> ConsistencyStats {
        self.stats
    }

    /// Removes every candidate whose length differs from its variable's length.
    ///
    /// # Returns
    ///
    /// The number of removed candidates.
    pub fn enforce_node_consistency(&mut self, domains: &mut Domains) -> usize {
        let dictionary = self.dictionary;
        let mut removed = 0;
        for (var, variable) in self.puzzle.variables().iter().enumerate() {
            removed += domains.retain(var, |&word| dictionary[word].len() == variable.length);
        }
        self.stats.node_pruned += removed;
        removed
    }

    /// Makes `x` arc consistent with `y`: removes every candidate of `x` that has no
    /// candidate of `y` agreeing with it at their overlap.
    ///
    /// # Returns
    ///
    /// `true` if the domain of `x` changed. Variables that do not cross never change.
    pub fn revise(&mut self, domains: &mut Domains, x: VariableId, y: VariableId) -> bool {
        let Some((i, j)) = self.puzzle.overlap(x, y) else {
            return false;
        };

        let dictionary = self.dictionary;
        let supported: FxHashSet<char> = domains[y]
            .iter()
            .filter_map(|&word| dictionary.letter(word, j))
            .collect();

        let removed = domains.retain(x, |&word| {
            dictionary
                .letter(word, i)
                .is_some_and(|letter| supported.contains(&letter))
        });

        if removed > 0 {
            self.stats.revisions += 1;
            self.stats.arc_pruned += removed;
            trace!("revise ({x}, {y}) removed {removed} values");
        }
        removed > 0
    }

    /// Runs AC-3 starting from every arc of the puzzle.
    ///
    /// # Returns
    ///
    /// `false` if a domain became empty, `true` otherwise.
    pub fn ac3(&mut self, domains: &mut Domains) -> bool {
        let arcs: Vec<Arc> = self.puzzle.arcs().collect();
        self.ac3_with_arcs(domains, arcs)
    }

    /// Runs AC-3 starting from the given arcs only. Arcs re-queued by revisions are
    /// processed as usual.
    ///
    /// # Returns
    ///
    /// `false` if a domain became empty, `true` otherwise.
    pub fn ac3_with_arcs(
        &mut self,
        domains: &mut Domains,
        arcs: impl IntoIterator<Item = Arc>,
    ) -> bool {
        let mut queue: VecDeque<Arc> = arcs.into_iter().collect();

        while let Some((x, y)) = queue.pop_front() {
            self.stats.arcs_processed += 1;

            if !self.revise(domains, x, y) {
                continue;
            }

            if domains[x].is_empty() {
                trace!("domain of {x} wiped out by ({x}, {y})");
                return false;
            }

            queue.extend(
                self.puzzle
                    .neighbors(x)
                    .iter()
                    .filter(|&&z| z != y)
                    .map(|&z| (z, x)),
            );
        }

        true
    }
}
