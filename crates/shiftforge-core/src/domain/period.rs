//! Scheduling periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interval::DateInterval;

/// One scheduling unit: a contiguous date range with a horizon index.
///
/// Periods are ordered by `index`; they need not be contiguous with each
/// other. Downstream code works with indices only; the conversion from
/// absolute dates happens exactly once, at the model boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Position within the horizon, `0..num_periods`.
    pub index: usize,
    /// First date of the period.
    pub start_date: NaiveDate,
    /// Last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Creates a period. `end_date < start_date` is a data error the
    /// feasibility analyzer reports; construction does not reject it.
    pub fn new(index: usize, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Period {
            index,
            start_date,
            end_date,
        }
    }

    /// The period's date range as an interval.
    pub fn interval(&self) -> DateInterval {
        DateInterval {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Splits `[start, end]` into weekly periods (final chunk clipped).
    ///
    /// This is the horizon derivation used by the CLI and the sample
    /// generator: seven-day chunks starting at `start`.
    pub fn weekly(start: NaiveDate, end: NaiveDate) -> Vec<Period> {
        let mut periods = Vec::new();
        let mut current = start;
        let mut index = 0;
        while current <= end {
            let chunk_end = (current + chrono::Duration::days(6)).min(end);
            periods.push(Period::new(index, current, chunk_end));
            current = chunk_end + chrono::Duration::days(1);
            index += 1;
        }
        periods
    }
}
