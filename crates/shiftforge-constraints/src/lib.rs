//! shiftforge Constraints - the constraint-family compilers.
//!
//! Every scheduling rule kind is one [`ConstraintFamily`]: it reads the
//! assignment tensor plus its own inputs and emits hard assertions and/or
//! violation variables with per-term priorities. The [`ObjectiveBuilder`]
//! then collects every family's violation table into one weighted
//! minimization.
//!
//! Families never talk to each other; they agree only on variable identity
//! through the shared tensor. The order they run in is irrelevant, as long
//! as every one runs before the objective is built.

pub mod absence;
pub mod availability;
pub mod config;
pub mod coverage;
pub mod fairness;
pub mod family;
pub mod frequency;
pub mod objective;
pub mod order;
pub mod request;
pub mod restriction;
pub mod sequence;

pub use absence::MaxAbsenceFamily;
pub use availability::AvailabilityFamily;
pub use config::{ConstraintConfig, ConstraintSettings, ParamValue, Parameters};
pub use coverage::CoverageFamily;
pub use fairness::FairnessFamily;
pub use family::{ConstraintError, ConstraintFamily, ModelInput, Violation, ViolationTable};
pub use frequency::ShiftFrequencyFamily;
pub use objective::{ObjectiveBuilder, ObjectiveTerm};
pub use order::ShiftOrderFamily;
pub use request::RequestFamily;
pub use restriction::RestrictionFamily;
pub use sequence::SequenceFamily;
