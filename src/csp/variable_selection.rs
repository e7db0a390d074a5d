#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for choosing the next variable to branch on.
//!
//! - `MinimumRemainingValues`: the unassigned variable with the fewest candidates
//!   left, ties broken by the highest degree (most crossings) and then by the lowest
//!   id. Picking the most constrained slot first makes dead ends show up early.
//! - `FixedOrder`: the unassigned variable with the lowest id.
//!
//! `VariableSelectionType` is the command line name of a strategy and
//! `VariableSelectionImpls` dispatches to one chosen at runtime.

use crate::csp::assignment::Assignment;
use crate::csp::domain::Domains;
use crate::csp::puzzle::Puzzle;
use crate::csp::variable::VariableId;
use clap::ValueEnum;
use std::cmp::Reverse;
use std::fmt::{Debug, Display, Formatter};

/// Picks the next unassigned variable.
pub trait VariableSelection: Debug + Clone + Default {
    /// Returns an unassigned variable, or `None` if every variable is assigned.
    fn pick(
        &self,
        puzzle: &Puzzle,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VariableId>;
}

/// Minimum remaining values, then highest degree, then lowest id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumRemainingValues;

impl VariableSelection for MinimumRemainingValues {
    fn pick(
        &self,
        puzzle: &Puzzle,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VariableId> {
        assignment
            .unassigned()
            .min_by_key(|&var| (domains.size(var), Reverse(puzzle.degree(var))))
    }
}

/// The first unassigned variable by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn pick(&self, _: &Puzzle, _: &Domains, assignment: &Assignment) -> Option<VariableId> {
        assignment.unassigned().next()
    }
}

/// Runtime choice between the variable selection strategies.
#[derive(Debug, Clone)]
pub enum VariableSelectionImpls {
    /// See `MinimumRemainingValues`.
    MinimumRemainingValues(MinimumRemainingValues),
    /// See `FixedOrder`.
    FixedOrder(FixedOrder),
}

impl Default for VariableSelectionImpls {
    fn default() -> Self {
        Self::MinimumRemainingValues(MinimumRemainingValues)
    }
}

impl VariableSelection for VariableSelectionImpls {
    fn pick(
        &self,
        puzzle: &Puzzle,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VariableId> {
        match self {
            Self::MinimumRemainingValues(s) => s.pick(puzzle, domains, assignment),
            Self::FixedOrder(s) => s.pick(puzzle, domains, assignment),
        }
    }
}

/// Names of the variable selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VariableSelectionType {
    /// Minimum remaining values with degree tie-break.
    #[default]
    Mrv,
    /// Lowest unassigned id.
    Fixed,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

impl VariableSelectionType {
    /// Builds the strategy this name refers to.
    #[must_use]
    pub const fn to_impl(self) -> VariableSelectionImpls {
        match self {
            Self::Mrv => VariableSelectionImpls::MinimumRemainingValues(MinimumRemainingValues),
            Self::Fixed => VariableSelectionImpls::FixedOrder(FixedOrder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_puzzle() -> Puzzle {
        // down 0, across 1, down 2, across 3; every slot crosses two others.
        Puzzle::from_rows(&[
            vec![true, true, true, true],
            vec![true, false, false, true],
            vec![true, true, true, true],
        ])
    }

    fn star_puzzle() -> Puzzle {
        // down 0, across 1, down 2; only the across slot crosses two others.
        Puzzle::from_rows(&[
            vec![true, true, true],
            vec![true, false, true],
            vec![true, false, true],
        ])
    }

    #[test]
    fn test_mrv_picks_smallest_domain() {
        let puzzle = frame_puzzle();
        let domains = Domains::from(vec![vec![0, 1, 2], vec![0, 1], vec![0], vec![0, 1]]);
        let assignment = Assignment::new(4);
        assert_eq!(
            MinimumRemainingValues.pick(&puzzle, &domains, &assignment),
            Some(2)
        );
    }

    #[test]
    fn test_mrv_breaks_ties_by_degree() {
        let puzzle = star_puzzle();
        assert_eq!(puzzle.degree(1), 2);
        let domains = Domains::from(vec![vec![0, 1], vec![0, 1], vec![0, 1]]);
        let assignment = Assignment::new(3);
        assert_eq!(
            MinimumRemainingValues.pick(&puzzle, &domains, &assignment),
            Some(1)
        );
    }

    #[test]
    fn test_mrv_breaks_remaining_ties_by_id() {
        let puzzle = frame_puzzle();
        let domains = Domains::from(vec![vec![0, 1]; 4]);
        let mut assignment = Assignment::new(4);
        assert_eq!(
            MinimumRemainingValues.pick(&puzzle, &domains, &assignment),
            Some(0)
        );
        assignment.bind(0, 0);
        assert_eq!(
            MinimumRemainingValues.pick(&puzzle, &domains, &assignment),
            Some(1)
        );
    }

    #[test]
    fn test_skips_assigned() {
        let puzzle = frame_puzzle();
        let domains = Domains::from(vec![vec![0], vec![0, 1], vec![0, 1, 2], vec![0, 1, 2]]);
        let mut assignment = Assignment::new(4);
        assignment.bind(0, 0);
        assignment.bind(1, 1);
        assert_eq!(
            MinimumRemainingValues.pick(&puzzle, &domains, &assignment),
            Some(2)
        );
        assert_eq!(FixedOrder.pick(&puzzle, &domains, &assignment), Some(2));
    }

    #[test]
    fn test_complete_assignment_picks_nothing() {
        let puzzle = frame_puzzle();
        let domains = Domains::from(vec![vec![0]; 4]);
        let mut assignment = Assignment::new(4);
        for var in 0..4 {
            assignment.bind(var, var);
        }
        assert_eq!(
            MinimumRemainingValues.pick(&puzzle, &domains, &assignment),
            None
        );
        assert_eq!(FixedOrder.pick(&puzzle, &domains, &assignment), None);
    }

    #[test]
    fn test_type_to_impl() {
        let puzzle = frame_puzzle();
        let domains = Domains::from(vec![vec![0, 1], vec![0, 1], vec![0], vec![0, 1]]);
        let assignment = Assignment::new(4);
        let fixed = VariableSelectionType::Fixed.to_impl();
        let mrv = VariableSelectionType::Mrv.to_impl();
        assert_eq!(fixed.pick(&puzzle, &domains, &assignment), Some(0));
        assert_eq!(mrv.pick(&puzzle, &domains, &assignment), Some(2));
        assert_eq!(VariableSelectionType::Mrv.to_string(), "mrv");
    }
}
