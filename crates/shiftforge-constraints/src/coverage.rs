//! Coverage: staff every applicable (period, shift type) cell.

use shiftforge_model::{LinearExpr, Model, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Asserts the required head count for every applicable cell.
///
/// By default the head count is an equality at `workers_required`. The
/// parameters `min_workers` and `max_workers` switch a cell to a ranged
/// form: the lower bound defaults to the shift's `workers_required` and
/// `max_workers` caps over-staffing. Cells whose shift has no applicable
/// day inside the period emit nothing, as do shifts with
/// `workers_required = 0` (unless a ranged form is configured).
///
/// Coverage is always hard; a soft coverage would let the solver trade
/// staffing against preferences, which no caller wants.
pub struct CoverageFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl CoverageFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        CoverageFamily {
            config,
            violations: ViolationTable::new(),
        }
    }
}

impl Default for CoverageFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::hard())
    }
}

impl ConstraintFamily for CoverageFamily {
    fn id(&self) -> &'static str {
        "coverage"
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

        let min_override = self.config.parameters.get_usize("min_workers");
        let max_override = self.config.parameters.get_usize("max_workers");
        let ranged = min_override.is_some() || max_override.is_some();

        let mut cells = 0usize;
        for period in input.periods {
            for shift_type in input.shift_types {
                if shift_type.applicable_day_count(period.start_date, period.end_date) == 0 {
                    continue;
                }
                let required = shift_type.workers_required as usize;
                if required == 0 && !ranged {
                    continue;
                }

                let sum = LinearExpr::sum(
                    input
                        .workers
                        .iter()
                        .map(|w| variables.assignment(&w.id, period.index, &shift_type.id)),
                );

                match (ranged, max_override) {
                    (false, _) => model.add_eq(&sum, required as f64),
                    (true, Some(max)) => {
                        let lo = min_override.unwrap_or(required);
                        model.add_range(&sum, lo as f64, max as f64);
                    }
                    (true, None) => {
                        let lo = min_override.unwrap_or(required);
                        model.add_ge(&sum, lo as f64);
                    }
                }
                cells += 1;
            }
        }

        tracing::debug!(cells, "coverage constraints emitted");
        Ok(())
    }

    fn violations(&self) -> &ViolationTable {
        &self.violations
    }
}
