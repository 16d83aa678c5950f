//! Shift frequency: workers must appear regularly in a shift set.

use shiftforge_model::{LinearExpr, Model, VarId, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Sliding-window presence over a requirement's shift-type set.
///
/// For each requirement a window of `W = max_periods_between + 1` periods
/// slides across the horizon; each window wants at least one assignment
/// from the set. Soft mode flags empty windows, hard mode asserts
/// `Σ window >= 1`.
///
/// Requirements are skipped silently when `W` exceeds the horizon (no
/// window fits), when the worker is unknown, or when every referenced
/// shift type is unknown; the feasibility analyzer reports those cases.
pub struct ShiftFrequencyFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl ShiftFrequencyFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        ShiftFrequencyFamily {
            config,
            violations: ViolationTable::new(),
        }
    }
}

impl Default for ShiftFrequencyFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::soft(500))
    }
}

impl ConstraintFamily for ShiftFrequencyFamily {
    fn id(&self) -> &'static str {
        "shift_frequency"
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
        for req in input.frequency_requirements {
            if !variables.has_worker(&req.worker_id) {
                tracing::debug!(worker = %req.worker_id, "frequency rule skipped: unknown worker");
                continue;
            }
            let known_shifts: Vec<&str> = req
                .shift_types
                .iter()
                .filter(|s| variables.has_shift_type(s))
                .map(String::as_str)
                .collect();
            if known_shifts.is_empty() {
                tracing::debug!(
                    worker = %req.worker_id,
                    "frequency rule skipped: no known shift types"
                );
                continue;
            }

            let window = req.max_periods_between + 1;
            if window > num_periods {
                tracing::debug!(
                    worker = %req.worker_id,
                    window,
                    num_periods,
                    "frequency rule skipped: window exceeds horizon"
                );
                continue;
            }

            for start in 0..=(num_periods - window) {
                let cells: Vec<VarId> = (start..start + window)
                    .flat_map(|p| {
                        known_shifts
                            .iter()
                            .map(move |s| variables.assignment(&req.worker_id, p, s))
                    })
                    .collect();
                let sum = LinearExpr::sum(cells.iter().copied());

                if self.config.is_hard {
                    model.add_ge(&sum, 1.0);
                } else {
                    let label = format!("freq_viol_{}_{start}", req.worker_id);
                    let flag = model.new_bool(label.clone());
                    model.add_is_zero_equality(flag, &sum, cells.len() as i64);
                    self.violations.push(flag, 1, label);
                }
            }
        }
        Ok(())
    }

    fn violations(&self) -> &ViolationTable {
        &self.violations
    }
}
