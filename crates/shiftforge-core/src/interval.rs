//! Inclusive date intervals.
//!
//! Every date-range comparison in the pipeline goes through [`DateInterval`]
//! so that overlap semantics live in exactly one place. Intervals are closed:
//! both endpoints are part of the interval.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A closed date interval `[start, end]`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shiftforge_core::DateInterval;
///
/// let week = DateInterval::new(
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
/// )
/// .unwrap();
/// assert!(week.contains(NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    /// First date of the interval.
    pub start: NaiveDate,
    /// Last date of the interval (inclusive).
    pub end: NaiveDate,
}

impl DateInterval {
    /// Creates an interval, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(DateInterval { start, end })
    }

    /// Returns true if `date` falls inside the interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the two closed intervals intersect.
    ///
    /// `a.start <= b.end && a.end >= b.start` is the single overlap rule
    /// used by availability, request and analyzer code alike.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of days covered, counting both endpoints.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(DateInterval::new(d(2026, 1, 10), d(2026, 1, 9)).is_err());
    }

    #[test]
    fn single_day_interval_overlaps_itself() {
        let a = DateInterval::new(d(2026, 1, 10), d(2026, 1, 10)).unwrap();
        assert!(a.overlaps(&a));
        assert_eq!(a.num_days(), 1);
    }

    #[test]
    fn touching_endpoints_overlap() {
        let a = DateInterval::new(d(2026, 1, 1), d(2026, 1, 7)).unwrap();
        let b = DateInterval::new(d(2026, 1, 7), d(2026, 1, 14)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        let a = DateInterval::new(d(2026, 1, 1), d(2026, 1, 7)).unwrap();
        let b = DateInterval::new(d(2026, 1, 8), d(2026, 1, 14)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }
}
