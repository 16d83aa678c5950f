//! Error types for shiftforge domain records

use thiserror::Error;

/// Errors raised when constructing or parsing domain records.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown availability type string.
    #[error("unknown availability type: '{0}' (expected 'unavailable' or 'preferred')")]
    UnknownAvailabilityType(String),

    /// Unknown request type string.
    #[error("unknown request type: '{0}' (expected 'positive' or 'negative')")]
    UnknownRequestType(String),

    /// Unknown shift-order trigger type string.
    #[error("unknown trigger type: '{0}' (expected 'shift_type', 'category' or 'unavailability')")]
    UnknownTriggerType(String),

    /// Unknown shift-order preferred type string.
    #[error("unknown preferred type: '{0}' (expected 'shift_type' or 'category')")]
    UnknownPreferredType(String),

    /// Unknown shift-order direction string.
    #[error("unknown direction: '{0}' (expected 'before' or 'after')")]
    UnknownDirection(String),

    /// A trigger or preferred value was required but missing.
    #[error("missing {0} value for shift order rule")]
    MissingOrderValue(&'static str),

    /// A date interval with `end < start`.
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}
