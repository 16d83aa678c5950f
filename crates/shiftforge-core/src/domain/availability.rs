//! Worker availability records.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::interval::DateInterval;

/// How an availability record affects scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityType {
    /// The worker must not be scheduled in the covered periods.
    Unavailable,
    /// The worker would like to be scheduled in the covered periods.
    /// Carried through the pipeline but does not constrain the model.
    Preferred,
}

impl FromStr for AvailabilityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unavailable" => Ok(AvailabilityType::Unavailable),
            "preferred" => Ok(AvailabilityType::Preferred),
            other => Err(DomainError::UnknownAvailabilityType(other.to_string())),
        }
    }
}

/// A dated availability record for one worker.
///
/// The record applies to a period iff their closed date ranges intersect.
/// When `shift_type_id` is set the effect is limited to that shift; when
/// `None`, an `unavailable` record blocks every shift in the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// Worker the record applies to.
    pub worker_id: String,
    /// First covered date.
    pub start_date: NaiveDate,
    /// Last covered date (inclusive).
    pub end_date: NaiveDate,
    /// Effect of the record.
    pub availability_type: AvailabilityType,
    /// Restricts the effect to one shift type when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_type_id: Option<String>,
}

impl Availability {
    /// The record's date range as an interval.
    pub fn interval(&self) -> DateInterval {
        DateInterval {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns true if the record covers any date of `[start, end]`.
    pub fn covers(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.interval().overlaps(&DateInterval { start, end })
    }

    /// Returns true for `unavailable` records.
    pub fn is_unavailable(&self) -> bool {
        self.availability_type == AvailabilityType::Unavailable
    }
}
