#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backtracking search for a complete crossword assignment.
//!
//! `solve` runs in three stages:
//! 1.  **Node consistency:** every domain is cut down to the words of the right
//!     length.
//! 2.  **Arc consistency:** AC-3 over every arc of the puzzle. If a domain empties
//!     the puzzle has no solution and search never starts.
//! 3.  **Search:** depth-first over the variables. At each level the variable
//!     selector picks an unassigned variable, the value ordering lists its
//!     candidates, and each candidate that agrees with the current assignment
//!     (length, uniqueness, letters at bound crossings) is bound, passed to the
//!     inference strategy and recursed on. Failed candidates are unbound and any
//!     domains pruned by inference are restored.
//!
//! The search mutates one `Assignment` in place, so at every step it holds only the
//! bindings on the current path. The search is exhaustive: `None` means there is no
//! consistent complete assignment drawn from the filtered domains.

use crate::csp::assignment::{Assignment, LetterGrid};
use crate::csp::consistency::ConsistencyEngine;
use crate::csp::dictionary::Dictionary;
use crate::csp::domain::Domains;
use crate::csp::inference::Inference;
use crate::csp::puzzle::Puzzle;
use crate::csp::solver::{DefaultConfig, SolutionStats, Solver, SolverConfig};
use crate::csp::value_ordering::ValueOrdering;
use crate::csp::variable_selection::VariableSelection;
use log::{debug, trace};

/// A backtracking crossword solver.
#[derive(Debug, Clone)]
pub struct Backtracking<Config: SolverConfig = DefaultConfig> {
    /// The geometry being filled.
    pub puzzle: Puzzle,
    /// The words available to fill it.
    pub dictionary: Dictionary,
    /// Candidate words per variable, as left by the last call to `solve`.
    pub domains: Domains,
    /// The current bindings.
    pub assignment: Assignment,
    /// Picks the variable to branch on.
    pub selector: Config::VariableSelector,
    /// Orders the candidates of that variable.
    pub value_order: Config::ValueOrder,
    /// Prunes domains after each binding.
    pub inference: Config::Inference,
    stats: SolutionStats,
}

impl<Config: SolverConfig> Solver<Config> for Backtracking<Config> {
    fn new(puzzle: Puzzle, dictionary: Dictionary) -> Self {
        Self::from_parts(
            puzzle,
            dictionary,
            Config::VariableSelector::default(),
            Config::ValueOrder::default(),
            Config::Inference::default(),
        )
    }

    fn solve(&mut self) -> Option<Assignment> {
        let num_variables = self.puzzle.num_variables();
        self.stats = SolutionStats::default();
        self.domains = Domains::full(num_variables, &self.dictionary);
        self.assignment = Assignment::new(num_variables);

        let mut engine = ConsistencyEngine::new(&self.puzzle, &self.dictionary);
        let removed = engine.enforce_node_consistency(&mut self.domains);
        debug!("node consistency removed {removed} values");

        self.stats.arc_consistent = engine.ac3(&mut self.domains);
        if !self.stats.arc_consistent {
            self.stats.absorb(&engine.stats());
            debug!("arc consistency emptied a domain, skipping search");
            return None;
        }
        debug!(
            "arc consistency left {} candidates over {num_variables} variables",
            self.domains.total()
        );

        self.stats.search_invoked = true;
        let mut search = Search::<Config> {
            puzzle: &self.puzzle,
            dictionary: &self.dictionary,
            engine,
            domains: &mut self.domains,
            assignment: &mut self.assignment,
            selector: &self.selector,
            value_order: &mut self.value_order,
            inference: &mut self.inference,
            stats: &mut self.stats,
        };
        let found = search.backtrack(0);
        let engine_stats = search.engine.stats();
        self.stats.absorb(&engine_stats);

        debug!(
            "search {} after {} assignments and {} backtracks",
            if found { "succeeded" } else { "failed" },
            self.stats.assignments,
            self.stats.backtracks
        );

        found.then(|| self.assignment.clone())
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl<Config: SolverConfig> Backtracking<Config> {
    /// Creates a solver from explicitly constructed strategies.
    #[must_use]
    pub fn from_parts(
        puzzle: Puzzle,
        dictionary: Dictionary,
        selector: Config::VariableSelector,
        value_order: Config::ValueOrder,
        inference: Config::Inference,
    ) -> Self {
        let num_variables = puzzle.num_variables();
        let domains = Domains::full(num_variables, &dictionary);
        Self {
            puzzle,
            dictionary,
            domains,
            assignment: Assignment::new(num_variables),
            selector,
            value_order,
            inference,
            stats: SolutionStats::default(),
        }
    }

    /// Letters of the current assignment laid out on the grid.
    #[must_use]
    pub fn letter_grid(&self) -> LetterGrid {
        self.assignment.letter_grid(&self.puzzle, &self.dictionary)
    }
}

/// Borrowed state of one search.
struct Search<'a, Config: SolverConfig> {
    puzzle: &'a Puzzle,
    dictionary: &'a Dictionary,
    engine: ConsistencyEngine<'a>,
    domains: &'a mut Domains,
    assignment: &'a mut Assignment,
    selector: &'a Config::VariableSelector,
    value_order: &'a mut Config::ValueOrder,
    inference: &'a mut Config::Inference,
    stats: &'a mut SolutionStats,
}

impl<Config: SolverConfig> Search<'_, Config> {
    fn backtrack(&mut self, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(var) = self.selector.pick(self.puzzle, self.domains, self.assignment) else {
            return true;
        };

        let values = self.value_order.order(
            var,
            self.puzzle,
            self.dictionary,
            self.domains,
            self.assignment,
        );

        for word in values {
            self.stats.consistency_checks += 1;
            if !self
                .assignment
                .is_consistent_with(var, word, self.puzzle, self.dictionary)
            {
                continue;
            }

            trace!("depth {depth}: {} = {}", self.puzzle.variable(var), self.dictionary[word]);
            self.assignment.bind(var, word);
            self.stats.assignments += 1;

            let snapshot = self.inference.prunes().then(|| self.domains.clone());
            let viable =
                self.inference
                    .infer(&mut self.engine, self.domains, self.assignment, var, word);

            if viable && self.backtrack(depth + 1) {
                return true;
            }

            if let Some(snapshot) = snapshot {
                *self.domains = snapshot;
            }
            self.assignment.unbind(var);
            self.stats.backtracks += 1;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::inference::{InferenceType, MaintainArcConsistency, NoInference};
    use crate::csp::solver::DynamicConfig;
    use crate::csp::value_ordering::{DomainOrder, Shuffled, ValueOrderingType};
    use crate::csp::variable_selection::{
        FixedOrder, MinimumRemainingValues, VariableSelectionType,
    };

    #[derive(Debug, Clone)]
    struct MacConfig;

    impl SolverConfig for MacConfig {
        type VariableSelector = MinimumRemainingValues;
        type ValueOrder = DomainOrder;
        type Inference = MaintainArcConsistency;
    }

    #[derive(Debug, Clone)]
    struct NaiveConfig;

    impl SolverConfig for NaiveConfig {
        type VariableSelector = FixedOrder;
        type ValueOrder = DomainOrder;
        type Inference = NoInference;
    }

    #[derive(Debug, Clone)]
    struct ShuffledConfig;

    impl SolverConfig for ShuffledConfig {
        type VariableSelector = MinimumRemainingValues;
        type ValueOrder = Shuffled;
        type Inference = NoInference;
    }

    fn crossing_puzzle() -> Puzzle {
        Puzzle::from_rows(&[
            vec![true, true, true],
            vec![false, false, true],
            vec![false, false, true],
        ])
    }

    fn frame_puzzle() -> Puzzle {
        Puzzle::from_rows(&[
            vec![true, true, true, true],
            vec![true, false, false, true],
            vec![true, true, true, true],
        ])
    }

    fn frame_dictionary() -> Dictionary {
        [
            "BEAR", "BUS", "RAT", "SALT", "CAT", "DOGS", "SIT", "BAT", "TOSS", "RUST",
        ]
        .into_iter()
        .collect()
    }

    fn words(solver: &Backtracking<impl SolverConfig>, assignment: &Assignment) -> Vec<String> {
        (0..assignment.len())
            .map(|var| {
                assignment
                    .get(var)
                    .map(|w| solver.dictionary[w].to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    fn assert_valid(solver: &Backtracking<impl SolverConfig>, assignment: &Assignment) {
        assert!(assignment.is_complete());
        assert!(assignment.is_consistent(&solver.puzzle, &solver.dictionary));
    }

    #[test]
    fn test_single_slot() {
        let puzzle = Puzzle::from_rows(&[vec![true, true, true]]);
        assert_eq!(puzzle.num_variables(), 1);
        let dictionary: Dictionary = ["CAT", "DOG"].into_iter().collect();
        let mut solver: Backtracking = Backtracking::new(puzzle, dictionary);

        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
        let word = &words(&solver, &assignment)[0];
        assert!(word == "CAT" || word == "DOG");
    }

    #[test]
    fn test_crossing() {
        let dictionary: Dictionary = ["CAT", "TEA", "ATE"].into_iter().collect();
        let mut solver: Backtracking = Backtracking::new(crossing_puzzle(), dictionary);

        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
        let found = words(&solver, &assignment);
        assert_eq!(found[0].chars().nth(2), found[1].chars().next());
        assert_eq!(found, vec!["CAT", "TEA"]);

        let stats = solver.stats();
        assert!(stats.arc_consistent);
        assert!(stats.search_invoked);
        assert_eq!(stats.assignments, 2);
        assert_eq!(stats.backtracks, 0);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_crossing_fails_before_search() {
        let dictionary: Dictionary = ["CAT", "DOG"].into_iter().collect();
        let mut solver: Backtracking = Backtracking::new(crossing_puzzle(), dictionary);

        assert!(solver.solve().is_none());
        let stats = solver.stats();
        assert!(!stats.arc_consistent);
        assert!(!stats.search_invoked);
        assert_eq!(stats.assignments, 0);
        assert_eq!(stats.consistency_checks, 0);
    }

    #[test]
    fn test_frame_solution() {
        let mut solver: Backtracking = Backtracking::new(frame_puzzle(), frame_dictionary());

        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
        assert_eq!(words(&solver, &assignment), vec!["BUS", "BEAR", "RAT", "SALT"]);
    }

    #[test]
    fn test_words_are_not_reused() {
        // Down 0 and across 1 share their first cell.
        let puzzle = Puzzle::from_rows(&[
            vec![true, true, true],
            vec![true, false, false],
            vec![true, false, false],
        ]);

        let dictionary: Dictionary = ["CAT"].into_iter().collect();
        let mut solver: Backtracking = Backtracking::new(puzzle.clone(), dictionary);
        assert!(solver.solve().is_none());
        let stats = solver.stats();
        assert!(stats.arc_consistent);
        assert!(stats.search_invoked);

        let dictionary: Dictionary = ["CAT", "COW"].into_iter().collect();
        let mut solver: Backtracking = Backtracking::new(puzzle, dictionary);
        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
        let found = words(&solver, &assignment);
        assert_ne!(found[0], found[1]);
    }

    #[test]
    fn test_search_backtracks() {
        // TOT across is only supported by TOT down, which uniqueness rejects.
        let dictionary: Dictionary = ["TOT", "CAB", "BAD"].into_iter().collect();
        let mut solver: Backtracking<NaiveConfig> =
            Backtracking::new(crossing_puzzle(), dictionary);

        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
        assert_eq!(words(&solver, &assignment), vec!["CAB", "BAD"]);
        assert_eq!(solver.stats().backtracks, 1);
        assert_eq!(solver.stats().assignments, 3);
    }

    #[test]
    fn test_exhausted_search_returns_none() {
        // Every arc has support but no complete assignment uses distinct words.
        let puzzle = Puzzle::from_rows(&[
            vec![true, true, true],
            vec![true, false, false],
            vec![true, false, false],
        ]);
        let dictionary: Dictionary = ["CAT", "DOG"].into_iter().collect();
        let mut solver: Backtracking<NaiveConfig> = Backtracking::new(puzzle, dictionary);

        assert!(solver.solve().is_none());
        let stats = solver.stats();
        assert!(stats.search_invoked);
        assert!(stats.backtracks > 0);
        assert_eq!(solver.assignment.num_assigned(), 0);
    }

    #[test]
    fn test_strategies_agree_on_validity() {
        let mut mac: Backtracking<MacConfig> = Backtracking::new(frame_puzzle(), frame_dictionary());
        let mut naive: Backtracking<NaiveConfig> =
            Backtracking::new(frame_puzzle(), frame_dictionary());
        let mut shuffled: Backtracking<ShuffledConfig> = Backtracking::from_parts(
            frame_puzzle(),
            frame_dictionary(),
            MinimumRemainingValues,
            Shuffled::with_seed(42),
            NoInference,
        );

        let a = mac.solve().unwrap();
        assert_valid(&mac, &a);
        let b = naive.solve().unwrap();
        assert_valid(&naive, &b);
        let c = shuffled.solve().unwrap();
        assert_valid(&shuffled, &c);
    }

    #[test]
    fn test_mac_restores_domains() {
        let mut solver: Backtracking<MacConfig> =
            Backtracking::new(frame_puzzle(), frame_dictionary());
        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
        for (var, word) in assignment.iter() {
            assert!(solver.domains.contains(var, word));
        }
    }

    #[test]
    fn test_dynamic_config() {
        let mut solver = Backtracking::<DynamicConfig>::from_parts(
            frame_puzzle(),
            frame_dictionary(),
            VariableSelectionType::Fixed.to_impl(),
            ValueOrderingType::Domain.to_impl(None),
            InferenceType::Mac.to_impl(),
        );
        let assignment = solver.solve().unwrap();
        assert_valid(&solver, &assignment);
    }

    #[test]
    fn test_solve_is_repeatable() {
        let mut solver: Backtracking = Backtracking::new(frame_puzzle(), frame_dictionary());
        let first = solver.solve().unwrap();
        let first_stats = solver.stats();
        let second = solver.solve().unwrap();
        assert_eq!(first, second);
        assert_eq!(first_stats, solver.stats());
    }

    #[test]
    fn test_letter_grid() {
        let dictionary: Dictionary = ["CAT", "TEA", "ATE"].into_iter().collect();
        let mut solver: Backtracking = Backtracking::new(crossing_puzzle(), dictionary);
        solver.solve().unwrap();

        let grid = solver.letter_grid();
        assert_eq!(grid[0], vec![Some('C'), Some('A'), Some('T')]);
        assert_eq!(grid[1], vec![None, None, Some('E')]);
        assert_eq!(grid[2], vec![None, None, Some('A')]);
    }
}
