#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver interface, its strategy configuration and the statistics it reports.
//!
//! A solver is generic over a `SolverConfig`, which names one implementation of
//! each pluggable strategy. `DefaultConfig` resolves them statically;
//! `DynamicConfig` uses the `*Impls` enums so the command line can choose them at
//! runtime.

use crate::csp::assignment::Assignment;
use crate::csp::consistency::ConsistencyStats;
use crate::csp::dictionary::Dictionary;
use crate::csp::inference::{Inference, InferenceImpls, NoInference};
use crate::csp::puzzle::Puzzle;
use crate::csp::value_ordering::{LeastConstrainingValue, ValueOrdering, ValueOrderingImpls};
use crate::csp::variable_selection::{
    MinimumRemainingValues, VariableSelection, VariableSelectionImpls,
};
use std::fmt::Debug;

/// The strategies a solver is built from.
pub trait SolverConfig: Debug + Clone {
    /// Chooses the next variable to branch on.
    type VariableSelector: VariableSelection;
    /// Orders the candidates of that variable.
    type ValueOrder: ValueOrdering;
    /// Prunes domains after each binding.
    type Inference: Inference;
}

/// Minimum remaining values, least constraining value, no inference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrder = LeastConstrainingValue;
    type Inference = NoInference;
}

/// Strategies chosen at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type VariableSelector = VariableSelectionImpls;
    type ValueOrder = ValueOrderingImpls;
    type Inference = InferenceImpls;
}

/// Counters collected during one call to `solve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionStats {
    /// Values removed by node consistency.
    pub node_pruned: usize,
    /// Values removed by arc consistency, including during inference.
    pub arc_pruned: usize,
    /// Arc revisions that removed something.
    pub revisions: usize,
    /// Arcs taken off the AC-3 queue.
    pub arcs_processed: usize,
    /// Whether the initial AC-3 pass left every domain non-empty.
    pub arc_consistent: bool,
    /// Whether backtracking search ran at all.
    pub search_invoked: bool,
    /// Candidate values checked against the assignment.
    pub consistency_checks: usize,
    /// Bindings made.
    pub assignments: usize,
    /// Bindings undone.
    pub backtracks: usize,
    /// Deepest level reached, in bound variables.
    pub max_depth: usize,
}

impl SolutionStats {
    /// Folds consistency engine counters into these statistics.
    pub const fn absorb(&mut self, stats: &ConsistencyStats) {
        self.node_pruned += stats.node_pruned;
        self.arc_pruned += stats.arc_pruned;
        self.revisions += stats.revisions;
        self.arcs_processed += stats.arcs_processed;
    }
}

/// A crossword solver.
pub trait Solver<Config: SolverConfig = DefaultConfig> {
    /// Creates a solver for `puzzle` drawing words from `dictionary`.
    fn new(puzzle: Puzzle, dictionary: Dictionary) -> Self;

    /// Fills the puzzle.
    ///
    /// # Returns
    ///
    /// A complete, consistent assignment, or `None` if the puzzle has no solution.
    fn solve(&mut self) -> Option<Assignment>;

    /// Statistics for the most recent call to `solve`.
    fn stats(&self) -> SolutionStats;
}
