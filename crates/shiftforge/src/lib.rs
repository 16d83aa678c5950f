//! shiftforge - work-shift schedule optimization.
//!
//! This facade re-exports the public API of the workspace crates. Most
//! applications only need the [`prelude`]:
//!
//! ```no_run
//! use shiftforge::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = CsvLoader::new();
//! let workers = loader.load_workers("workers.csv")?;
//! let shift_types = loader.load_shift_types("shift_types.csv")?;
//! let periods = Period::weekly(
//!     chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
//!     chrono::NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
//! );
//!
//! let solver = ShiftSolver::new(workers, shift_types, periods);
//! let result = solver.solve(&SolveOptions::with_time_limit(60.0))?;
//! if let Some(schedule) = &result.schedule {
//!     write_schedule_json(schedule, "schedule.json")?;
//! }
//! # Ok(())
//! # }
//! ```

pub use shiftforge_config as config;
pub use shiftforge_constraints as constraints;
pub use shiftforge_core as core;
pub use shiftforge_io as io;
pub use shiftforge_model as model;
pub use shiftforge_solver as solver;

/// The commonly used types in one import.
pub mod prelude {
    pub use shiftforge_config::{ShiftForgeConfig, SolverSettings};
    pub use shiftforge_constraints::{
        ConstraintConfig, ConstraintFamily, ConstraintSettings, ObjectiveBuilder, ParamValue,
    };
    pub use shiftforge_core::{
        Availability, AvailabilityType, OrderDirection, OrderTarget, OrderTrigger, Period,
        RequestType, Schedule, SchedulingRequest, ShiftFrequencyRequirement,
        ShiftOrderPreference, ShiftType, Worker,
    };
    pub use shiftforge_io::{
        read_schedule_json, write_schedule_json, CsvLoader, ExcelExporter, Industry,
        SampleGenerator,
    };
    pub use shiftforge_solver::{
        FeasibilityChecker, FeasibilityReport, ScheduleValidator, ShiftSolver, SolveOptions,
        SolveResult,
    };
}
