//! Shift types and their coverage requirements.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A kind of shift that may need staffing in each period.
///
/// `workers_required = 0` means the shift exists (and can be requested or
/// preferred) but imposes no coverage. `applicable_days` holds weekday
/// numbers 0–6 with Monday = 0; `None` means every day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftType {
    /// Unique shift-type id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Grouping used by fairness, sequence and ordering rules.
    pub category: String,
    /// Start of the shift within a day.
    pub start_time: NaiveTime,
    /// End of the shift (may be on the next day for overnight shifts).
    pub end_time: NaiveTime,
    /// Shift length in hours.
    pub duration_hours: f64,
    /// Workers needed per period for this shift.
    pub workers_required: u32,
    /// Marks shifts nobody wants; the fairness family balances these.
    #[serde(default)]
    pub is_undesirable: bool,
    /// Weekdays (Monday = 0) the shift runs on; `None` = all days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_days: Option<BTreeSet<u8>>,
}

impl ShiftType {
    /// Returns true if the shift runs on the given date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match &self.applicable_days {
            None => true,
            Some(days) => days.contains(&(date.weekday().num_days_from_monday() as u8)),
        }
    }

    /// Counts the days in `[start, end]` on which this shift runs.
    ///
    /// Used to decide whether a (period, shift) cell needs coverage at all:
    /// a count of zero suppresses the coverage constraint for that cell.
    pub fn applicable_day_count(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        match &self.applicable_days {
            None => ((end - start).num_days() + 1).max(0) as u32,
            Some(_) => {
                let mut count = 0;
                let mut current = start;
                while current <= end {
                    if self.applies_on(current) {
                        count += 1;
                    }
                    current = match current.succ_opt() {
                        Some(next) => next,
                        None => break,
                    };
                }
                count
            }
        }
    }
}
