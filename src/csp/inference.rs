#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! What the search does with the domains after each binding.
//!
//! `NoInference` is plain backtracking: domains stay as AC-3 left them and every
//! candidate is checked against the assignment instead. `MaintainArcConsistency`
//! narrows the bound variable's domain to its word and re-runs AC-3 from the arcs
//! pointing at it, so failures further down are detected before recursing. The
//! search snapshots the domains before inference and restores them on backtrack.

use crate::csp::assignment::Assignment;
use crate::csp::consistency::ConsistencyEngine;
use crate::csp::dictionary::WordId;
use crate::csp::domain::Domains;
use crate::csp::variable::VariableId;
use clap::ValueEnum;
use std::fmt::{Debug, Display, Formatter};

/// Domain pruning after `var` has been bound to `word`.
pub trait Inference: Debug + Clone + Default {
    /// Whether `infer` can modify the domains; if so the caller must snapshot them.
    fn prunes(&self) -> bool;

    /// Prunes domains after a binding.
    ///
    /// # Returns
    ///
    /// `false` if some domain became empty, meaning the binding cannot be extended.
    fn infer(
        &mut self,
        engine: &mut ConsistencyEngine<'_>,
        domains: &mut Domains,
        assignment: &Assignment,
        var: VariableId,
        word: WordId,
    ) -> bool;
}

/// Leaves the domains alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoInference;

impl Inference for NoInference {
    fn prunes(&self) -> bool {
        false
    }

    fn infer(
        &mut self,
        _: &mut ConsistencyEngine<'_>,
        _: &mut Domains,
        _: &Assignment,
        _: VariableId,
        _: WordId,
    ) -> bool {
        true
    }
}

/// Maintains arc consistency after every binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintainArcConsistency;

impl Inference for MaintainArcConsistency {
    fn prunes(&self) -> bool {
        true
    }

    fn infer(
        &mut self,
        engine: &mut ConsistencyEngine<'_>,
        domains: &mut Domains,
        assignment: &Assignment,
        var: VariableId,
        word: WordId,
    ) -> bool {
        domains.restrict(var, word);
        let arcs: Vec<_> = engine
            .puzzle()
            .neighbors(var)
            .iter()
            .filter(|&&z| !assignment.is_assigned(z))
            .map(|&z| (z, var))
            .collect();
        engine.ac3_with_arcs(domains, arcs)
    }
}

/// Runtime choice between the inference strategies.
#[derive(Debug, Clone, Default)]
pub enum InferenceImpls {
    /// See `NoInference`.
    #[default]
    None,
    /// See `MaintainArcConsistency`.
    MaintainArcConsistency(MaintainArcConsistency),
}

impl Inference for InferenceImpls {
    fn prunes(&self) -> bool {
        match self {
            Self::None => NoInference.prunes(),
            Self::MaintainArcConsistency(i) => i.prunes(),
        }
    }

    fn infer(
        &mut self,
        engine: &mut ConsistencyEngine<'_>,
        domains: &mut Domains,
        assignment: &Assignment,
        var: VariableId,
        word: WordId,
    ) -> bool {
        match self {
            Self::None => NoInference.infer(engine, domains, assignment, var, word),
            Self::MaintainArcConsistency(i) => i.infer(engine, domains, assignment, var, word),
        }
    }
}

/// Names of the inference strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InferenceType {
    /// Plain backtracking.
    #[default]
    None,
    /// Maintain arc consistency after every binding.
    Mac,
}

impl Display for InferenceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Mac => write!(f, "mac"),
        }
    }
}

impl InferenceType {
    /// Builds the strategy this name refers to.
    #[must_use]
    pub const fn to_impl(self) -> InferenceImpls {
        match self {
            Self::None => InferenceImpls::None,
            Self::Mac => InferenceImpls::MaintainArcConsistency(MaintainArcConsistency),
        }
    }
}
