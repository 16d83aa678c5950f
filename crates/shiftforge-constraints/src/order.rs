//! Shift order preference: what should come before or after what.

use shiftforge_core::{OrderDirection, OrderTarget, OrderTrigger, Worker};
use shiftforge_model::{LinearExpr, Model, VarId, Variables};

use crate::config::ConstraintConfig;
use crate::family::{ConstraintError, ConstraintFamily, ModelInput, ViolationTable};

/// "When the trigger occurs in period N, the preferred shift should occur
/// in the adjacent period", compiled over every adjacent period pair.
///
/// Triggers are a shift type, a whole category, or the worker being
/// unavailable (read from the availability records, no decision variable
/// involved). Preferred targets are a shift type or a category. A soft
/// violation fires when the trigger holds and the preferred does not; hard
/// mode asserts the implication instead.
///
/// Rules are skipped when the horizon has fewer than two periods, when a
/// referenced id is unknown, and (per worker) when the worker is
/// restricted from every preferred shift.
pub struct ShiftOrderFamily {
    config: ConstraintConfig,
    violations: ViolationTable,
}

impl ShiftOrderFamily {
    /// Creates the family with the given configuration.
    pub fn new(config: ConstraintConfig) -> Self {
        ShiftOrderFamily {
            config,
            violations: ViolationTable::new(),
        }
    }

    fn resolve_members<'a>(
        input: &ModelInput<'a>,
        target_shift: Option<&'a str>,
        target_category: Option<&'a str>,
    ) -> Vec<&'a str> {
        if let Some(id) = target_shift {
            return input
                .shift_types
                .iter()
                .filter(|s| s.id == id)
                .map(|s| s.id.as_str())
                .collect();
        }
        if let Some(category) = target_category {
            return input
                .shift_types
                .iter()
                .filter(|s| s.category == category)
                .map(|s| s.id.as_str())
                .collect();
        }
        Vec::new()
    }

    /// OR over the member assignments in one period; single members reuse
    /// the assignment variable.
    fn fires_var(
        model: &mut Model,
        variables: &Variables,
        worker_id: &str,
        period: usize,
        members: &[&str],
        name: String,
    ) -> VarId {
        if members.len() == 1 {
            return variables.assignment(worker_id, period, members[0]);
        }
        let lits: Vec<VarId> = members
            .iter()
            .map(|m| variables.assignment(worker_id, period, m))
            .collect();
        let flag = model.new_bool(name);
        model.add_or_equality(flag, &lits);
        flag
    }

    fn worker_unavailable_in(input: &ModelInput<'_>, worker: &Worker, period: usize) -> bool {
        let p = input.periods[period];
        input
            .availabilities
            .iter()
            .filter(|a| a.is_unavailable() && a.worker_id == worker.id)
            .any(|a| a.covers(p.start_date, p.end_date))
    }
}

impl Default for ShiftOrderFamily {
    fn default() -> Self {
        Self::new(ConstraintConfig::soft(100))
    }
}

impl ConstraintFamily for ShiftOrderFamily {
    fn id(&self) -> &'static str {
        "shift_order_preference"
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
        if num_periods < 2 {
            tracing::debug!("shift order rules skipped: fewer than two periods");
            return Ok(());
        }

        for rule in input.order_preferences {
            let trigger_members = match &rule.trigger {
                OrderTrigger::ShiftType(id) => Self::resolve_members(input, Some(id), None),
                OrderTrigger::Category(c) => Self::resolve_members(input, None, Some(c)),
                OrderTrigger::Unavailability => Vec::new(),
            };
            if !matches!(rule.trigger, OrderTrigger::Unavailability) && trigger_members.is_empty()
            {
                tracing::warn!(rule = %rule.rule_id, "unknown trigger reference; rule skipped");
                continue;
            }

            let preferred_members = match &rule.preferred {
                OrderTarget::ShiftType(id) => Self::resolve_members(input, Some(id), None),
                OrderTarget::Category(c) => Self::resolve_members(input, None, Some(c)),
            };
            if preferred_members.is_empty() {
                tracing::warn!(rule = %rule.rule_id, "unknown preferred reference; rule skipped");
                continue;
            }

            for worker in input.workers {
                if !rule.applies_to(&worker.id) || !variables.has_worker(&worker.id) {
                    continue;
                }
                // A worker barred from every preferred shift can never satisfy
                // the rule; penalizing them would only distort the objective.
                if preferred_members.iter().all(|m| !worker.can_work_shift(m)) {
                    continue;
                }

                for pair in 0..num_periods - 1 {
                    let (trigger_period, preferred_period) = match rule.direction {
                        OrderDirection::After => (pair, pair + 1),
                        OrderDirection::Before => (pair + 1, pair),
                    };

                    match &rule.trigger {
                        OrderTrigger::Unavailability => {
                            // The trigger is a fact from the records; pairs
                            // where it does not hold need no variables at all.
                            if !Self::worker_unavailable_in(input, worker, trigger_period) {
                                continue;
                            }
                            let preferred_fires = Self::fires_var(
                                model,
                                variables,
                                &worker.id,
                                preferred_period,
                                &preferred_members,
                                format!(
                                    "order_pref_{}_{}_{preferred_period}",
                                    rule.rule_id, worker.id
                                ),
                            );
                            if self.config.is_hard {
                                model.add_ge(&LinearExpr::var(preferred_fires), 1.0);
                            } else {
                                let label = format!(
                                    "order_viol_{}_{}_{pair}",
                                    rule.rule_id, worker.id
                                );
                                let flag = model.new_bool(label.clone());
                                // violation = 1 - preferred.
                                let mut link = LinearExpr::var(flag);
                                link.add_term(preferred_fires, 1.0);
                                model.add_eq(&link, 1.0);
                                self.violations.push(flag, rule.priority, label);
                            }
                        }
                        _ => {
                            let preferred_fires = Self::fires_var(
                                model,
                                variables,
                                &worker.id,
                                preferred_period,
                                &preferred_members,
                                format!(
                                    "order_pref_{}_{}_{preferred_period}",
                                    rule.rule_id, worker.id
                                ),
                            );
                            let trigger_fires = Self::fires_var(
                                model,
                                variables,
                                &worker.id,
                                trigger_period,
                                &trigger_members,
                                format!(
                                    "order_trig_{}_{}_{trigger_period}",
                                    rule.rule_id, worker.id
                                ),
                            );
                            if self.config.is_hard {
                                model.add_implication(trigger_fires, preferred_fires);
                            } else {
                                let label = format!(
                                    "order_viol_{}_{}_{pair}",
                                    rule.rule_id, worker.id
                                );
                                let flag = model.new_bool(label.clone());
                                model.add_and_not_equality(flag, trigger_fires, preferred_fires);
                                self.violations.push(flag, rule.priority, label);
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
