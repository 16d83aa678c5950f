//! Restriction: keep workers off shift types they must not work.

use shiftforge_model::{LinearExpr, Model, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Zeroes every `(worker, period, restricted shift)` cell.
///
/// Hard by default. In soft mode each restricted cell instead gets a
/// violation variable equal to the assignment, so working a restricted
/// shift is possible but penalized.
pub struct RestrictionFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl RestrictionFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        RestrictionFamily {
            config,
            violations: ViolationTable::new(),
        }
    }
}

impl Default for RestrictionFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::hard())
    }
}

impl ConstraintFamily for RestrictionFamily {
    fn id(&self) -> &'static str {
        "restriction"
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

        for worker in input.workers {
            for shift_type_id in &worker.restricted_shifts {
                // Restrictions may reference shift types outside this solve.
                if !variables.has_shift_type(shift_type_id) {
                    continue;
                }
                for period in 0..input.num_periods() {
                    let var = variables.assignment(&worker.id, period, shift_type_id);
                    if self.config.is_hard {
                        model.fix_bool(var, false);
                    } else {
                        let flag = model.new_bool(format!(
                            "restr_viol_{}_{}_{}",
                            worker.id, period, shift_type_id
                        ));
                        let mut link = LinearExpr::var(flag);
                        link.add_term(var, -1.0);
                        model.add_eq(&link, 0.0);
                        self.violations.push(
                            flag,
                            1,
                            format!("restr_viol_{}_{}_{}", worker.id, period, shift_type_id),
                        );
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

#[cfg(test)]
mod tests {
    use shiftforge_core::{Period, ShiftType, Worker};
    use shiftforge_model::VariableBuilder;

    use super::*;

    fn shift(id: &str) -> ShiftType {
        ShiftType {
            id: id.to_string(),
            name: id.to_string(),
            category: id.to_string(),
            start_time: chrono::NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            duration_hours: 8.0,
            workers_required: 1,
            is_undesirable: false,
            applicable_days: None,
        }
    }

    fn periods(n: usize) -> Vec<Period> {
        (0..n)
            .map(|i| {
                let start = chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
                    + chrono::Duration::weeks(i as i64);
                Period::new(i, start, start + chrono::Duration::days(6))
            })
            .collect()
    }

    #[test]
    fn hard_mode_fixes_cells_without_violations() {
        let workers = vec![Worker::new("W001", "W001").with_restricted_shift("night")];
        let shifts = vec![shift("day"), shift("night")];
        let periods = periods(3);

        let mut model = Model::new();
        let vars = VariableBuilder::new(&workers, &shifts, 3).build(&mut model);
        let mut family = RestrictionFamily::default();
        family
            .apply(&mut model, &vars, &ModelInput::basic(&workers, &shifts, &periods))
            .unwrap();

        // One fixed cell per period.
        assert_eq!(model.num_assertions(), 3);
        assert!(family.violations().is_empty());
    }

    #[test]
    fn soft_mode_emits_one_violation_per_cell() {
        let workers = vec![Worker::new("W001", "W001").with_restricted_shift("night")];
        let shifts = vec![shift("day"), shift("night")];
        let periods = periods(4);

        let mut model = Model::new();
        let vars = VariableBuilder::new(&workers, &shifts, 4).build(&mut model);
        let mut family = RestrictionFamily::new(ConstraintConfig::soft(250));
        family
            .apply(&mut model, &vars, &ModelInput::basic(&workers, &shifts, &periods))
            .unwrap();

        assert_eq!(family.violations().len(), 4);
        assert!(family
            .violations()
            .labels()
            .all(|l| l.contains("W001") && l.contains("night")));
    }

    #[test]
    fn unknown_restricted_shift_is_ignored() {
        let workers = vec![Worker::new("W001", "W001").with_restricted_shift("swing")];
        let shifts = vec![shift("day")];
        let periods = periods(2);

        let mut model = Model::new();
        let vars = VariableBuilder::new(&workers, &shifts, 2).build(&mut model);
        let mut family = RestrictionFamily::default();
        family
            .apply(&mut model, &vars, &ModelInput::basic(&workers, &shifts, &periods))
            .unwrap();

        assert_eq!(model.num_assertions(), 0);
    }
}
