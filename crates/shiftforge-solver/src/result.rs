//! Solve options and results.

use serde::Serialize;
use shiftforge_core::Schedule;

use crate::feasibility::FeasibilityIssue;

/// Knobs for one solve.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Wall-clock budget handed to the backend.
    pub time_limit_seconds: f64,
    /// Parallel-search hint for the backend; `None` keeps its default.
    pub num_search_workers: Option<u32>,
    /// Skip the pre-solve feasibility analysis.
    pub skip_feasibility_check: bool,
    /// Forward backend log output.
    pub log_solver_output: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            time_limit_seconds: 300.0,
            num_search_workers: None,
            skip_feasibility_check: false,
            log_solver_output: false,
        }
    }
}

impl SolveOptions {
    /// Options with the given time limit, other knobs default.
    pub fn with_time_limit(seconds: f64) -> Self {
        SolveOptions {
            time_limit_seconds: seconds,
            ..Self::default()
        }
    }
}

/// Outcome of one solve.
///
/// Infeasibility is data, not an error: `success = false` with the
/// analyzer's issue list (pre-solve) or the backend's status (in-solve).
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    /// True when a schedule was produced.
    pub success: bool,
    /// Canonical status name: OPTIMAL, FEASIBLE, INFEASIBLE, UNKNOWN or
    /// MODEL_INVALID.
    pub status_name: String,
    /// Wall-clock seconds spent in the backend (0 when the analyzer
    /// short-circuited).
    pub solve_time_seconds: f64,
    /// Objective value of the returned schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
    /// The schedule, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    /// Blocking issues found by the analyzer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FeasibilityIssue>,
    /// Non-blocking analyzer findings, returned alongside any result.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FeasibilityIssue>,
}

impl SolveResult {
    /// A failed result carrying the analyzer's findings.
    pub(crate) fn infeasible_from_analysis(
        issues: Vec<FeasibilityIssue>,
        warnings: Vec<FeasibilityIssue>,
    ) -> Self {
        SolveResult {
            success: false,
            status_name: "INFEASIBLE".to_string(),
            solve_time_seconds: 0.0,
            objective_value: None,
            schedule: None,
            issues,
            warnings,
        }
    }
}
