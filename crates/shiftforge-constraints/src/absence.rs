//! Max absence: cap how long a worker can go without a given shift.

use shiftforge_model::{LinearExpr, Model, VarId, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Default for the `max_periods_absent` parameter.
const DEFAULT_MAX_PERIODS_ABSENT: usize = 4;

/// Sliding-window absence cap per (worker, shift type).
///
/// A window of `max_periods_absent + 1` periods slides across the horizon
/// for every worker and every shift type in scope; an all-empty window is a
/// violation. The `shift_types` list parameter narrows the scope; by
/// default every shift type is checked. Windows larger than the horizon
/// emit nothing.
pub struct MaxAbsenceFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl MaxAbsenceFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        MaxAbsenceFamily {
            config,
            violations: ViolationTable::new(),
        }
    }
}

impl Default for MaxAbsenceFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::soft(100))
    }
}

impl ConstraintFamily for MaxAbsenceFamily {
    fn id(&self) -> &'static str {
        "max_absence"
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

        let max_absent = self
            .config
            .parameters
            .get_usize("max_periods_absent")
            .unwrap_or(DEFAULT_MAX_PERIODS_ABSENT);
        let window = max_absent + 1;
        let num_periods = input.num_periods();
        if window > num_periods {
            tracing::debug!(
                window,
                num_periods,
                "max absence skipped: window exceeds horizon"
            );
            return Ok(());
        }

        let scope: Vec<&str> = match self.config.parameters.get_list("shift_types") {
            Some(subset) => subset
                .iter()
                .map(String::as_str)
                .filter(|s| variables.has_shift_type(s))
                .collect(),
            None => input.shift_types.iter().map(|s| s.id.as_str()).collect(),
        };

        for worker in input.workers {
            for shift_type_id in &scope {
                for start in 0..=(num_periods - window) {
                    let cells: Vec<VarId> = (start..start + window)
                        .map(|p| variables.assignment(&worker.id, p, shift_type_id))
                        .collect();
                    let sum = LinearExpr::sum(cells.iter().copied());

                    if self.config.is_hard {
                        model.add_ge(&sum, 1.0);
                    } else {
                        let label =
                            format!("abs_viol_{}_{}_{start}", worker.id, shift_type_id);
                        let flag = model.new_bool(label.clone());
                        model.add_is_zero_equality(flag, &sum, window as i64);
                        self.violations.push(flag, 1, label);
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
    use crate::config::ParamValue;

    fn d(day: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

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

    fn apply(num_periods: usize, config: ConstraintConfig) -> (Model, MaxAbsenceFamily) {
        let workers = vec![Worker::new("W001", "W001"), Worker::new("W002", "W002")];
        let shifts = vec![shift("day"), shift("night")];
        let periods: Vec<Period> = (0..num_periods)
            .map(|i| {
                let start = d(5) + chrono::Duration::weeks(i as i64);
                Period::new(i, start, start + chrono::Duration::days(6))
            })
            .collect();

        let mut model = Model::new();
        let vars = VariableBuilder::new(&workers, &shifts, num_periods).build(&mut model);
        let mut family = MaxAbsenceFamily::new(config);
        family
            .apply(&mut model, &vars, &ModelInput::basic(&workers, &shifts, &periods))
            .unwrap();
        (model, family)
    }

    fn soft(max_absent: i64) -> ConstraintConfig {
        ConstraintConfig::soft(100).with_param("max_periods_absent", ParamValue::Int(max_absent))
    }

    #[test]
    fn window_equal_to_horizon_gives_one_window_per_pair() {
        // max_absent = 4 -> window 5 == horizon: one window per (worker, shift).
        let (_, family) = apply(5, soft(4));
        assert_eq!(family.violations().len(), 2 * 2);
    }

    #[test]
    fn window_exceeding_horizon_emits_nothing() {
        let (model, family) = apply(4, soft(4));
        assert!(family.violations().is_empty());
        assert_eq!(model.num_assertions(), 0);
    }

    #[test]
    fn zero_tolerance_checks_every_period() {
        // max_absent = 0 -> every period its own window.
        let (_, family) = apply(4, soft(0));
        assert_eq!(family.violations().len(), 2 * 2 * 4);
    }

    #[test]
    fn shift_type_filter_narrows_scope() {
        let config = soft(2).with_param(
            "shift_types",
            ParamValue::List(vec!["night".to_string()]),
        );
        let (_, family) = apply(5, config);
        // window 3 over 5 periods -> 3 windows, night only, two workers.
        assert_eq!(family.violations().len(), 2 * 3);
        assert!(family.violations().labels().all(|l| l.contains("night")));
    }

    #[test]
    fn hard_mode_asserts_presence() {
        let config = ConstraintConfig {
            is_hard: true,
            ..soft(2)
        };
        let (model, family) = apply(5, config);
        assert!(family.violations().is_empty());
        assert_eq!(model.num_assertions(), 2 * 2 * 3);
    }
}
