//! The polymorphic constraint-family contract.

use shiftforge_core::{
    Availability, Period, SchedulingRequest, ShiftFrequencyRequirement, ShiftOrderPreference,
    ShiftType, Worker,
};
use shiftforge_model::{Model, VarId, Variables};
use thiserror::Error;

use crate::config::ConstraintConfig;

/// Errors a family can raise while compiling its sub-model.
#[derive(Debug, Error)]
pub enum ConstraintError {
    /// A parameter was present but had the wrong shape.
    #[error("constraint family '{family}': parameter '{name}' must be {expected}")]
    InvalidParameter {
        family: &'static str,
        name: &'static str,
        expected: &'static str,
    },
}

/// One violation variable with its per-term priority multiplier.
///
/// The priority lives here, in the family's side table, keyed by variable
/// identity. It is never encoded into the variable's name.
#[derive(Debug, Clone)]
pub struct Violation {
    /// The violation variable (boolean, or a small non-negative integer for
    /// spread-style terms).
    pub var: VarId,
    /// Per-term multiplier applied on top of the family weight.
    pub priority: i64,
    /// Diagnostic label naming the rule instance and cell.
    pub label: String,
}

/// The violation variables a family emitted during `apply`.
#[derive(Debug, Clone, Default)]
pub struct ViolationTable {
    entries: Vec<Violation>,
}

impl ViolationTable {
    /// The empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation variable.
    pub fn push(&mut self, var: VarId, priority: i64, label: impl Into<String>) {
        self.entries.push(Violation {
            var,
            priority,
            label: label.into(),
        });
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the recorded violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.entries.iter()
    }

    /// Labels of all recorded violations, for tests and diagnostics.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.label.as_str())
    }
}

/// Everything a family may read while compiling.
///
/// Bundling the inputs keeps the trait signature stable as families grow;
/// each family reads only the slices it cares about.
#[derive(Debug, Clone, Copy)]
pub struct ModelInput<'a> {
    pub workers: &'a [Worker],
    pub shift_types: &'a [ShiftType],
    pub periods: &'a [Period],
    pub availabilities: &'a [Availability],
    pub requests: &'a [SchedulingRequest],
    pub frequency_requirements: &'a [ShiftFrequencyRequirement],
    pub order_preferences: &'a [ShiftOrderPreference],
}

impl<'a> ModelInput<'a> {
    /// A minimal input with only workers, shift types and periods set.
    pub fn basic(
        workers: &'a [Worker],
        shift_types: &'a [ShiftType],
        periods: &'a [Period],
    ) -> Self {
        ModelInput {
            workers,
            shift_types,
            periods,
            availabilities: &[],
            requests: &[],
            frequency_requirements: &[],
            order_preferences: &[],
        }
    }

    /// Number of periods in the horizon.
    pub fn num_periods(&self) -> usize {
        self.periods.len()
    }
}

/// One constraint kind: compiles its rules into the model.
///
/// `apply` runs exactly once per solve, after every assignment variable
/// exists and before the objective is built. A family keeps no state beyond
/// its violation table.
pub trait ConstraintFamily {
    /// Stable family identifier used in configuration and diagnostics.
    fn id(&self) -> &'static str;

    /// The family's configuration.
    fn config(&self) -> &ConstraintConfig;

    /// Emits the family's assertions and violation variables.
    fn apply(
        &mut self,
        model: &mut Model,
        variables: &Variables,
        input: &ModelInput<'_>,
    ) -> Result<(), ConstraintError>;

    /// The violation table filled by `apply`.
    fn violations(&self) -> &ViolationTable;

    /// Returns true if the family participates in this solve.
    fn is_enabled(&self) -> bool {
        self.config().enabled
    }

    /// Returns true if the family asserts instead of penalizing.
    fn is_hard(&self) -> bool {
        self.config().is_hard
    }

    /// Family-level weight applied to every violation term.
    fn weight(&self) -> i64 {
        self.config().weight
    }
}
