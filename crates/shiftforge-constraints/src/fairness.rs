//! Fairness: spread undesirable shifts evenly across eligible workers.

use std::collections::BTreeSet;

use shiftforge_model::{LinearExpr, Model, VarId, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Minimizes the per-category spread of undesirable-shift counts.
///
/// For each undesirable category (or the `categories` parameter subset) the
/// family counts each eligible worker's assignments across the horizon,
/// bounds the counts with `min_count`/`max_count` auxiliaries and pushes
/// `spread = max_count - min_count` toward zero through the objective.
/// A worker is eligible when at least one shift in the category is not
/// restricted for them. Categories with fewer than two eligible workers are
/// skipped entirely; there is nobody to be unfair to.
///
/// The violation entry is the spread variable itself: a small non-negative
/// integer rather than a boolean.
pub struct FairnessFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl FairnessFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        FairnessFamily {
            config,
            violations: ViolationTable::new(),
        }
    }

    fn categories(&self, input: &ModelInput<'_>) -> Vec<String> {
        if let Some(subset) = self.config.parameters.get_list("categories") {
            return subset.to_vec();
        }
        let mut seen = BTreeSet::new();
        input
            .shift_types
            .iter()
            .filter(|s| s.is_undesirable)
            .filter_map(|s| seen.insert(s.category.clone()).then(|| s.category.clone()))
            .collect()
    }
}

impl Default for FairnessFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::soft(500))
    }
}

impl ConstraintFamily for FairnessFamily {
    fn id(&self) -> &'static str {
        "fairness"
    }

    fn config(&self) -> &ConstraintConfig {
        &self.config
    }

    fn apply(
        &mut self,
        model: &mut Model,
        variables: &Variables,
        input: &ModelInput<'_>,
    ) -> Result<(), ConstraintError> {
        if !self.config.enabled {
            return Ok(());
        }

        let num_periods = input.num_periods();
        for category in self.categories(input) {
            let members: Vec<&str> = input
                .shift_types
                .iter()
                .filter(|s| s.category == category && s.is_undesirable)
                .map(|s| s.id.as_str())
                .collect();
            if members.is_empty() {
                continue;
            }

            let eligible: Vec<&str> = input
                .workers
                .iter()
                .filter(|w| members.iter().any(|m| w.can_work_shift(m)))
                .map(|w| w.id.as_str())
                .collect();
            if eligible.len() < 2 {
                tracing::debug!(
                    category = %category,
                    eligible = eligible.len(),
                    "fairness skipped: fewer than two eligible workers"
                );
                continue;
            }

            let count_bound = (num_periods * members.len()) as i64;
            let max_count = model.new_int(format!("fair_max_{category}"), 0, count_bound);
            let min_count = model.new_int(format!("fair_min_{category}"), 0, count_bound);

            for worker_id in &eligible {
                let count: Vec<VarId> = (0..num_periods)
                    .flat_map(|p| {
                        members
                            .iter()
                            .map(move |m| variables.assignment(worker_id, p, m))
                    })
                    .collect();

                // max_count >= count, min_count <= count; objective pressure
                // makes both tight at optimality.
                let mut upper = LinearExpr::var(max_count);
                for &v in &count {
                    upper.add_term(v, -1.0);
                }
                model.add_ge(&upper, 0.0);

                let mut lower = LinearExpr::var(min_count);
                for &v in &count {
                    lower.add_term(v, -1.0);
                }
                model.add_le(&lower, 0.0);
            }

            let spread = model.new_int(format!("fair_spread_{category}"), 0, count_bound);
            let mut link = LinearExpr::var(spread);
            link.add_term(max_count, -1.0).add_term(min_count, 1.0);
            model.add_eq(&link, 0.0);

            self.violations
                .push(spread, 1, format!("fair_spread_{category}"));
        }
        Ok(())
    }

    fn violations(&self) -> &ViolationTable {
        &self.violations
    }
}
