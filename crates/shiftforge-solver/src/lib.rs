//! shiftforge Solver - from problem records to a validated schedule.
//!
//! The pipeline here is:
//! 1. [`FeasibilityChecker`] rejects structurally unsatisfiable inputs
//! 2. [`ShiftSolver`] builds the variable tensor, runs every constraint
//!    family, assembles the objective and drives the backend
//! 3. [`ScheduleValidator`] re-checks a produced schedule against the
//!    original inputs
//!
//! Each solve constructs a fresh model; no state crosses solves.

pub mod feasibility;
pub mod result;
pub mod solver;
pub mod validate;

pub use feasibility::{FeasibilityChecker, FeasibilityIssue, FeasibilityReport, IssueKind, Severity};
pub use result::{SolveOptions, SolveResult};
pub use solver::{ShiftSolver, SolverError};
pub use validate::{ScheduleValidator, ScheduleViolation, ViolationKind};
