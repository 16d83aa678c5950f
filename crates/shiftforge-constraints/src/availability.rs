//! Availability: keep workers off periods they are unavailable for.

use shiftforge_model::{LinearExpr, Model, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Applies `unavailable` records to the overlapping periods.
///
/// A record overlaps a period when their closed date ranges intersect.
/// Records naming a shift type zero just that cell; records without one
/// zero every shift for the worker in the period. `preferred` records pass
/// through untouched; only the request family expresses attraction.
pub struct AvailabilityFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl AvailabilityFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        AvailabilityFamily {
            config,
            violations: ViolationTable::new(),
        }
    }

    fn constrain_cell(
        &mut self,
        model: &mut Model,
        variables: &Variables,
        worker_id: &str,
        period: usize,
        shift_type_id: &str,
    ) {
        let Some(var) = variables.try_assignment(worker_id, period, shift_type_id) else {
            return;
        };
        if self.config.is_hard {
            model.fix_bool(var, false);
        } else {
            let label = format!("avail_viol_{worker_id}_{period}_{shift_type_id}");
            let flag = model.new_bool(label.clone());
            let mut link = LinearExpr::var(flag);
            link.add_term(var, -1.0);
            model.add_eq(&link, 0.0);
            self.violations.push(flag, 1, label);
        }
    }
}

impl Default for AvailabilityFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::hard())
    }
}

impl ConstraintFamily for AvailabilityFamily {
    fn id(&self) -> &'static str {
        "availability"
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

        for avail in input.availabilities {
            if !avail.is_unavailable() {
                continue;
            }
            for period in input.periods {
                if !avail.covers(period.start_date, period.end_date) {
                    continue;
                }
                match &avail.shift_type_id {
                    Some(shift_type_id) => {
                        self.constrain_cell(
                            model,
                            variables,
                            &avail.worker_id,
                            period.index,
                            shift_type_id,
                        );
                    }
                    None => {
                        for shift_type in input.shift_types {
                            self.constrain_cell(
                                model,
                                variables,
                                &avail.worker_id,
                                period.index,
                                &shift_type.id,
                            );
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
