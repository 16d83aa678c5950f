//! Post-solve validation of a schedule against its inputs.

use serde::Serialize;
use shiftforge_constraints::{ConstraintSettings, ModelInput};
use shiftforge_core::{RequestType, Schedule};

/// What a validation finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Coverage,
    Restriction,
    Availability,
    HardRequest,
}

/// One invariant broken by the schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleViolation {
    /// Category of the finding.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

impl ScheduleViolation {
    fn new(kind: ViolationKind, message: String) -> Self {
        ScheduleViolation { kind, message }
    }
}

/// Re-checks a produced schedule against the original records.
///
/// Only hard invariants are checked: coverage counts, restrictions,
/// unavailability and hard requests. Soft rules are allowed to be
/// violated, that is what the objective priced. A freshly solved schedule
/// must validate cleanly.
pub struct ScheduleValidator<'a> {
    input: ModelInput<'a>,
    settings: &'a ConstraintSettings,
}

impl<'a> ScheduleValidator<'a> {
    /// Creates a validator over the solve's inputs and settings.
    pub fn new(input: ModelInput<'a>, settings: &'a ConstraintSettings) -> Self {
        ScheduleValidator { input, settings }
    }

    /// Returns every broken invariant; empty means the schedule is valid.
    pub fn validate(&self, schedule: &Schedule) -> Vec<ScheduleViolation> {
        let mut violations = Vec::new();
        self.check_coverage(schedule, &mut violations);
        self.check_restrictions(schedule, &mut violations);
        self.check_availability(schedule, &mut violations);
        self.check_hard_requests(schedule, &mut violations);
        violations
    }

    fn check_coverage(&self, schedule: &Schedule, out: &mut Vec<ScheduleViolation>) {
        if !self.settings.coverage.enabled {
            return;
        }
        let min_override = self.settings.coverage.parameters.get_usize("min_workers");
        let max_override = self.settings.coverage.parameters.get_usize("max_workers");
        let ranged = min_override.is_some() || max_override.is_some();

        for period in schedule.periods.iter() {
            for shift_type in self.input.shift_types {
                if shift_type.applicable_day_count(period.period_start, period.period_end) == 0 {
                    continue;
                }
                let required = shift_type.workers_required as usize;
                if required == 0 && !ranged {
                    continue;
                }
                let assigned = period.workers_assigned(&shift_type.id);
                let ok = if ranged {
                    let lo = min_override.unwrap_or(required);
                    assigned >= lo && max_override.map_or(true, |hi| assigned <= hi)
                } else {
                    assigned == required
                };
                if !ok {
                    out.push(ScheduleViolation::new(
                        ViolationKind::Coverage,
                        format!(
                            "period {}: shift '{}' has {assigned} workers, requires {required}",
                            period.period_index, shift_type.id
                        ),
                    ));
                }
            }
        }
    }

    fn check_restrictions(&self, schedule: &Schedule, out: &mut Vec<ScheduleViolation>) {
        if !self.settings.restriction.enabled || !self.settings.restriction.is_hard {
            return;
        }
        for period in &schedule.periods {
            for worker in self.input.workers {
                for shift_type_id in &worker.restricted_shifts {
                    if period.is_assigned(&worker.id, shift_type_id) {
                        out.push(ScheduleViolation::new(
                            ViolationKind::Restriction,
                            format!(
                                "period {}: worker '{}' assigned restricted shift '{}'",
                                period.period_index, worker.id, shift_type_id
                            ),
                        ));
                    }
                }
            }
        }
    }

    fn check_availability(&self, schedule: &Schedule, out: &mut Vec<ScheduleViolation>) {
        if !self.settings.availability.enabled || !self.settings.availability.is_hard {
            return;
        }
        for avail in self.input.availabilities {
            if !avail.is_unavailable() {
                continue;
            }
            for period in &schedule.periods {
                if !avail.covers(period.period_start, period.period_end) {
                    continue;
                }
                let assigned = match &avail.shift_type_id {
                    Some(shift_type_id) => period.is_assigned(&avail.worker_id, shift_type_id),
                    None => period
                        .assignments
                        .get(&avail.worker_id)
                        .is_some_and(|shifts| !shifts.is_empty()),
                };
                if assigned {
                    out.push(ScheduleViolation::new(
                        ViolationKind::Availability,
                        format!(
                            "period {}: worker '{}' assigned while unavailable",
                            period.period_index, avail.worker_id
                        ),
                    ));
                }
            }
        }
    }

    fn check_hard_requests(&self, schedule: &Schedule, out: &mut Vec<ScheduleViolation>) {
        if !self.settings.request.enabled {
            return;
        }
        for request in self.input.requests {
            if !request.effective_is_hard(self.settings.request.is_hard) {
                continue;
            }
            for period in &schedule.periods {
                if !request.covers(period.period_start, period.period_end) {
                    continue;
                }
                let assigned = period.is_assigned(&request.worker_id, &request.shift_type_id);
                let honored = match request.request_type {
                    RequestType::Positive => assigned,
                    RequestType::Negative => !assigned,
                };
                if !honored {
                    out.push(ScheduleViolation::new(
                        ViolationKind::HardRequest,
                        format!(
                            "period {}: hard {:?} request for worker '{}' shift '{}' not honored",
                            period.period_index,
                            request.request_type,
                            request.worker_id,
                            request.shift_type_id
                        ),
                    ));
                }
            }
        }
    }
}
