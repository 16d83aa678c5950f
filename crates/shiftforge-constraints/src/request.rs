//! Requests: workers asking to work, or avoid, specific shifts.

use shiftforge_core::RequestType;
use shiftforge_model::{LinearExpr, Model, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// Compiles positive and negative requests per overlapping period.
///
/// A request is hard when its own `is_hard` says so, or when it is unset
/// and the family is configured hard. Hard requests become equality
/// assertions; soft requests become one violation variable per covered
/// cell, carrying the request's priority in the violation table:
///
/// - positive: `violation = 1 - assignment`
/// - negative: `violation = assignment`
pub struct RequestFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl RequestFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        RequestFamily {
            config,
            violations: ViolationTable::new(),
        }
    }
}

impl Default for RequestFamily {
    fn default() -> Self {
        // Requests default to soft: an unsatisfiable wish should cost, not kill.
        Self::new(ConstraintConfig::soft(100))
    }
}

impl ConstraintFamily for RequestFamily {
    fn id(&self) -> &'static str {
        "request"
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

        for request in input.requests {
            if !variables.has_worker(&request.worker_id)
                || !variables.has_shift_type(&request.shift_type_id)
            {
                tracing::warn!(
                    worker = %request.worker_id,
                    shift_type = %request.shift_type_id,
                    "request references unknown entities; skipped"
                );
                continue;
            }
            let hard = request.effective_is_hard(self.config.is_hard);

            for period in input.periods {
                if !request.covers(period.start_date, period.end_date) {
                    continue;
                }
                let var =
                    variables.assignment(&request.worker_id, period.index, &request.shift_type_id);

                if hard {
                    model.fix_bool(var, request.request_type == RequestType::Positive);
                    continue;
                }

                let kind = match request.request_type {
                    RequestType::Positive => "pos",
                    RequestType::Negative => "neg",
                };
                let label = format!(
                    "request_{kind}_{}_{}_{}",
                    request.worker_id, period.index, request.shift_type_id
                );
                let flag = model.new_bool(label.clone());
                let mut link = LinearExpr::var(flag);
                match request.request_type {
                    // violation + assignment = 1
                    RequestType::Positive => {
                        link.add_term(var, 1.0);
                        model.add_eq(&link, 1.0);
                    }
                    // violation - assignment = 0
                    RequestType::Negative => {
                        link.add_term(var, -1.0);
                        model.add_eq(&link, 0.0);
                    }
                }
                self.violations.push(flag, request.priority, label);
            }
        }
        Ok(())
    }

    fn violations(&self) -> &ViolationTable {
        &self.violations
    }
}
