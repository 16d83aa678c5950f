//! Objective assembly: one weighted sum over every violation variable.

use std::collections::BTreeMap;

use shiftforge_model::{Model, VarId};

use crate::family::ConstraintFamily;

/// One term of the minimization, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct ObjectiveTerm {
    /// Family the term came from.
    pub family: &'static str,
    /// Label of the underlying violation.
    pub label: String,
    /// The violation variable.
    pub var: VarId,
    /// Per-term multiplier from the family's side table.
    pub priority_multiplier: i64,
    /// Family-level weight at collection time.
    pub family_weight: i64,
    /// `priority_multiplier × family_weight`.
    pub effective_weight: i64,
}

/// Collects every enabled family's violations into the objective.
///
/// The builder is a pure summer: it applies `priority × family weight` per
/// term and never normalizes across families. Because term counts and
/// priorities scale independently, a family with many cells can outweigh
/// one with few; callers tune family weights to keep the intended
/// ordering.
#[derive(Debug, Default)]
pub struct ObjectiveBuilder {
    terms: Vec<ObjectiveTerm>,
}

impl ObjectiveBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the family's violation table.
    ///
    /// Hard families contribute nothing (their tables are empty), so the
    /// driver can pass every family without filtering.
    pub fn add_family(&mut self, family: &dyn ConstraintFamily) {
        let weight = family.weight();
        for violation in family.violations().iter() {
            self.terms.push(ObjectiveTerm {
                family: family.id(),
                label: violation.label.clone(),
                var: violation.var,
                priority_multiplier: violation.priority,
                family_weight: weight,
                effective_weight: violation.priority * weight,
            });
        }
    }

    /// Installs the minimization on the model.
    ///
    /// With no terms the objective is the constant 0 and the solve is a
    /// pure feasibility problem.
    pub fn build(&self, model: &mut Model) {
        for term in &self.terms {
            model.add_objective_term(term.var, term.effective_weight as f64);
        }
        tracing::info!(
            terms = self.terms.len(),
            families = self.total_weight_by_family().len(),
            "objective built"
        );
    }

    /// Every collected term, in collection order.
    pub fn terms(&self) -> &[ObjectiveTerm] {
        &self.terms
    }

    /// Sum of effective weights per family: the worst-case penalty each
    /// family can contribute.
    pub fn total_weight_by_family(&self) -> BTreeMap<&'static str, i64> {
        let mut totals = BTreeMap::new();
        for term in &self.terms {
            *totals.entry(term.family).or_insert(0) += term.effective_weight;
        }
        totals
    }

    /// Terms grouped by family, for diagnostics and tests.
    pub fn breakdown(&self) -> BTreeMap<&'static str, Vec<&ObjectiveTerm>> {
        let mut groups: BTreeMap<&'static str, Vec<&ObjectiveTerm>> = BTreeMap::new();
        for term in &self.terms {
            groups.entry(term.family).or_default().push(term);
        }
        groups
    }
}
