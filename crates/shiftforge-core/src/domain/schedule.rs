//! Schedule value types produced by the solver.
//!
//! The serde shape of [`Schedule`] is the JSON document of the export
//! interface; exporting and re-importing a schedule is lossless.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One concrete shift held by a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInstance {
    /// Shift type of the instance.
    pub shift_type_id: String,
    /// Date the instance is anchored to (the period start).
    pub date: NaiveDate,
}

/// Assignments for one period, keyed by worker id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    /// Horizon index of the period.
    pub period_index: usize,
    /// First date of the period.
    pub period_start: NaiveDate,
    /// Last date of the period (inclusive).
    pub period_end: NaiveDate,
    /// Shift instances per worker. Workers with no shifts are omitted.
    pub assignments: BTreeMap<String, Vec<ShiftInstance>>,
}

impl SchedulePeriod {
    /// Number of workers holding the given shift type in this period.
    pub fn workers_assigned(&self, shift_type_id: &str) -> usize {
        self.assignments
            .values()
            .filter(|shifts| shifts.iter().any(|s| s.shift_type_id == shift_type_id))
            .count()
    }

    /// Returns true if the worker holds the given shift type in this period.
    pub fn is_assigned(&self, worker_id: &str, shift_type_id: &str) -> bool {
        self.assignments
            .get(worker_id)
            .is_some_and(|shifts| shifts.iter().any(|s| s.shift_type_id == shift_type_id))
    }
}

/// Per-worker shift counts, kept for diagnostics and reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStatistics {
    /// Total shift instances across the horizon.
    pub total_shifts: usize,
    /// Shift counts keyed by shift-type category.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_category: BTreeMap<String, usize>,
}

/// A complete solved schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Caller-chosen identifier, also used to tag solve logging.
    pub schedule_id: String,
    /// First date of the horizon.
    pub start_date: NaiveDate,
    /// Last date of the horizon (inclusive).
    pub end_date: NaiveDate,
    /// One entry per period, in horizon order.
    pub periods: Vec<SchedulePeriod>,
    /// Per-worker statistics keyed by worker id.
    pub statistics: BTreeMap<String, WorkerStatistics>,
}

impl Schedule {
    /// Total number of shift instances in the schedule.
    pub fn total_assignments(&self) -> usize {
        self.periods
            .iter()
            .map(|p| p.assignments.values().map(Vec::len).sum::<usize>())
            .sum()
    }
}
