//! shiftforge Core - domain types for shift scheduling
//!
//! This crate provides the fundamental records the scheduling pipeline
//! operates on:
//! - Workers, shift types and scheduling periods
//! - Availability, request, frequency and ordering rules
//! - Schedule value types returned by the solver
//! - The inclusive date-interval helper shared by every overlap check

pub mod domain;
pub mod error;
pub mod interval;

pub use domain::{
    Availability, AvailabilityType, OrderDirection, OrderTarget, OrderTrigger, Period,
    RequestType, Schedule, SchedulePeriod, SchedulingRequest, ShiftFrequencyRequirement,
    ShiftInstance, ShiftOrderPreference, ShiftType, Worker, WorkerStatistics,
};
pub use error::DomainError;
pub use interval::DateInterval;
