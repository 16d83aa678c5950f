//! Sequence: limit same-category runs and enforce gaps between them.

use std::collections::BTreeSet;

use shiftforge_model::{LinearExpr, Model, VarId, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Adjacency rules over shift categories.
///
/// Two parameters drive the family, independently usable:
///
/// - `max_consecutive_same_category = m`: every run of `m + 1` consecutive
///   periods in which a worker holds the same category is a violation
///   (hard mode caps the run length instead).
/// - `min_gap_periods = g`: holding the same category twice within fewer
///   than `g` periods is a violation, one per offending pair (hard mode
///   forbids the pair).
///
/// With neither parameter set the family is a no-op.
pub struct SequenceFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl SequenceFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        SequenceFamily {
            config,
            violations: ViolationTable::new(),
        }
    }

    /// Per-period indicator: does the worker hold any shift of the category?
    ///
    /// Categories with a single member reuse the assignment variable
    /// directly; larger categories get an exact OR auxiliary.
    fn category_indicator(
        model: &mut Model,
        variables: &Variables,
        worker_id: &str,
        period: usize,
        category: &str,
        members: &[&str],
    ) -> VarId {
        if members.len() == 1 {
            return variables.assignment(worker_id, period, members[0]);
        }
        let lits: Vec<VarId> = members
            .iter()
            .map(|m| variables.assignment(worker_id, period, m))
            .collect();
        let flag = model.new_bool(format!("cat_{worker_id}_{period}_{category}"));
        model.add_or_equality(flag, &lits);
        flag
    }
}

impl Default for SequenceFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::soft(100))
    }
}

impl ConstraintFamily for SequenceFamily {
    fn id(&self) -> &'static str {
        "sequence"
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

        let max_consecutive = self.config.parameters.get_usize("max_consecutive_same_category");
        let min_gap = self.config.parameters.get_usize("min_gap_periods");
        if max_consecutive.is_none() && min_gap.is_none() {
            tracing::debug!("sequence family has no parameters; nothing to do");
            return Ok(());
        }

        let num_periods = input.num_periods();
        let categories: BTreeSet<&str> =
            input.shift_types.iter().map(|s| s.category.as_str()).collect();

        for worker in input.workers {
            for category in &categories {
                let members: Vec<&str> = input
                    .shift_types
                    .iter()
                    .filter(|s| s.category == *category)
                    .map(|s| s.id.as_str())
                    .collect();

                let indicators: Vec<VarId> = (0..num_periods)
                    .map(|p| {
                        Self::category_indicator(
                            model, variables, &worker.id, p, category, &members,
                        )
                    })
                    .collect();

                if let Some(m) = max_consecutive {
                    let window = m + 1;
                    if window <= num_periods {
                        for start in 0..=(num_periods - window) {
                            let run = &indicators[start..start + window];
                            if self.config.is_hard {
                                model.add_le(&LinearExpr::sum(run.iter().copied()), m as f64);
                            } else {
                                let label = format!(
                                    "seq_run_{}_{category}_{start}",
                                    worker.id
                                );
                                let flag = model.new_bool(label.clone());
                                // flag = AND(run): >= sum - m, <= each member.
                                let mut ge = LinearExpr::var(flag);
                                for &ind in run {
                                    ge.add_term(ind, -1.0);
                                }
                                model.add_ge(&ge, -(m as f64));
                                for &ind in run {
                                    model.add_implication(flag, ind);
                                }
                                self.violations.push(flag, 1, label);
                            }
                        }
                    }
                }

                if let Some(g) = min_gap {
                    for p in 0..num_periods {
                        for dist in 1..g {
                            let q = p + dist;
                            if q >= num_periods {
                                break;
                            }
                            if self.config.is_hard {
                                let mut pair = LinearExpr::var(indicators[p]);
                                pair.add_term(indicators[q], 1.0);
                                model.add_le(&pair, 1.0);
                            } else {
                                let label = format!(
                                    "seq_gap_{}_{category}_{p}_{q}",
                                    worker.id
                                );
                                let flag = model.new_bool(label.clone());
                                // flag = indicators[p] AND indicators[q].
                                let mut ge = LinearExpr::var(flag);
                                ge.add_term(indicators[p], -1.0)
                                    .add_term(indicators[q], -1.0);
                                model.add_ge(&ge, -1.0);
                                model.add_implication(flag, indicators[p]);
                                model.add_implication(flag, indicators[q]);
                                self.violations.push(flag, 1, label);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn violations(&self) -> &ViolationTable {
        &self.violations
    }
}
