//! Worker scheduling requests.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::interval::DateInterval;

/// Direction of a scheduling request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// The worker wants the shift in the covered periods.
    Positive,
    /// The worker wants to avoid the shift in the covered periods.
    Negative,
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Ok(RequestType::Positive),
            "negative" => Ok(RequestType::Negative),
            other => Err(DomainError::UnknownRequestType(other.to_string())),
        }
    }
}

/// A dated request by a worker to work (or avoid) a shift type.
///
/// `priority` scales the cost of ignoring the request relative to other
/// requests; the request family multiplies it into the objective weight.
/// `is_hard = None` inherits the family-level hard/soft setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    /// Worker the request belongs to.
    pub worker_id: String,
    /// First covered date.
    pub start_date: NaiveDate,
    /// Last covered date (inclusive).
    pub end_date: NaiveDate,
    /// Positive or negative.
    pub request_type: RequestType,
    /// Shift type the request targets.
    pub shift_type_id: String,
    /// Per-request weight multiplier, at least 1.
    #[serde(default = "default_priority")]
    pub priority: i64,
    /// Overrides the family's hard/soft mode when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hard: Option<bool>,
}

fn default_priority() -> i64 {
    1
}

impl SchedulingRequest {
    /// The request's date range as an interval.
    pub fn interval(&self) -> DateInterval {
        DateInterval {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns true if the request covers any date of `[start, end]`.
    pub fn covers(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.interval().overlaps(&DateInterval { start, end })
    }

    /// Effective hard/soft mode given the family default.
    pub fn effective_is_hard(&self, family_is_hard: bool) -> bool {
        self.is_hard.unwrap_or(family_is_hard)
    }
}
