//! The backend model: variables, assertions, objective, solve.
//!
//! CBC is a mixed-integer solver, so the reified boolean relations the
//! constraint families rely on are expressed as exact linear encodings.
//! Every helper documents its encoding; all of them are equalities in the
//! sense that the flag variable takes the reified value in every feasible
//! assignment, not just under objective pressure.

use std::collections::BTreeMap;
use std::time::Instant;

use coin_cbc::{Col, Model as CbcModel, Sense};

use crate::expr::LinearExpr;

/// CBC reports no incumbent by leaving the objective at a huge sentinel.
const NO_INCUMBENT_THRESHOLD: f64 = 1e29;

/// Opaque handle naming one decision variable in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Dense index of the variable, usable for side tables.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Canonical backend statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven-optimal solution found.
    Optimal,
    /// A solution was found but optimality was not proven (time limit).
    Feasible,
    /// The model was proven infeasible.
    Infeasible,
    /// The backend stopped without a solution or a proof.
    Unknown,
    /// The model itself was rejected before search.
    ModelInvalid,
}

impl SolveStatus {
    /// Upper-case status name used in results and logs.
    pub fn name(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::ModelInvalid => "MODEL_INVALID",
        }
    }

    /// Returns true if a schedule can be read back.
    pub fn is_success(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Backend search parameters.
#[derive(Debug, Clone)]
pub struct SolveParameters {
    /// Wall-clock budget for the search.
    pub time_limit_seconds: f64,
    /// Parallel-search hint; `None` leaves the backend default.
    pub num_search_workers: Option<u32>,
    /// Forward backend log output instead of silencing it.
    pub log_output: bool,
}

impl Default for SolveParameters {
    fn default() -> Self {
        SolveParameters {
            time_limit_seconds: 300.0,
            num_search_workers: None,
            log_output: false,
        }
    }
}

/// Variable values extracted from a backend solution.
#[derive(Debug, Clone)]
pub struct ModelSolution {
    values: Vec<f64>,
    objective_value: f64,
    solve_time_seconds: f64,
}

impl ModelSolution {
    /// Raw value of a variable.
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.0]
    }

    /// Value of a boolean variable, rounded defensively against LP noise.
    pub fn bool_value(&self, var: VarId) -> bool {
        self.values[var.0] > 0.5
    }

    /// Value of an integer variable.
    pub fn int_value(&self, var: VarId) -> i64 {
        self.values[var.0].round() as i64
    }

    /// Objective value of the solution.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Wall-clock seconds the backend spent.
    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }
}

/// The constraint model under construction.
///
/// One `Model` lives for exactly one solve; nothing is shared across solves.
pub struct Model {
    inner: CbcModel,
    cols: Vec<Col>,
    names: Vec<String>,
    objective: BTreeMap<usize, f64>,
    num_rows: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Model {
            inner: CbcModel::default(),
            cols: Vec::new(),
            names: Vec::new(),
            objective: BTreeMap::new(),
            num_rows: 0,
        }
    }

    /// Number of variables created so far.
    pub fn num_variables(&self) -> usize {
        self.cols.len()
    }

    /// Number of assertion rows emitted so far.
    pub fn num_assertions(&self) -> usize {
        self.num_rows
    }

    /// Diagnostic name of a variable.
    pub fn var_name(&self, var: VarId) -> &str {
        &self.names[var.0]
    }

    /// Creates a boolean decision variable.
    pub fn new_bool(&mut self, name: impl Into<String>) -> VarId {
        let col = self.inner.add_binary();
        self.cols.push(col);
        self.names.push(name.into());
        VarId(self.cols.len() - 1)
    }

    /// Creates an integer variable with inclusive bounds.
    pub fn new_int(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> VarId {
        let col = self.inner.add_integer();
        self.inner.set_col_lower(col, lower as f64);
        self.inner.set_col_upper(col, upper as f64);
        self.cols.push(col);
        self.names.push(name.into());
        VarId(self.cols.len() - 1)
    }

    fn add_row(&mut self, expr: &LinearExpr) -> coin_cbc::Row {
        let row = self.inner.add_row();
        self.num_rows += 1;
        // CBC keeps one weight per (row, col); aggregate duplicates first.
        let mut coeffs: BTreeMap<usize, f64> = BTreeMap::new();
        for &(var, coeff) in &expr.terms {
            *coeffs.entry(var.0).or_insert(0.0) += coeff;
        }
        for (idx, coeff) in coeffs {
            self.inner.set_weight(row, self.cols[idx], coeff);
        }
        row
    }

    /// Asserts `expr = rhs`.
    pub fn add_eq(&mut self, expr: &LinearExpr, rhs: f64) {
        let row = self.add_row(expr);
        self.inner.set_row_equal(row, rhs - expr.constant);
    }

    /// Asserts `expr <= rhs`.
    pub fn add_le(&mut self, expr: &LinearExpr, rhs: f64) {
        let row = self.add_row(expr);
        self.inner.set_row_upper(row, rhs - expr.constant);
    }

    /// Asserts `expr >= rhs`.
    pub fn add_ge(&mut self, expr: &LinearExpr, rhs: f64) {
        let row = self.add_row(expr);
        self.inner.set_row_lower(row, rhs - expr.constant);
    }

    /// Asserts `lo <= expr <= hi`.
    pub fn add_range(&mut self, expr: &LinearExpr, lo: f64, hi: f64) {
        let row = self.add_row(expr);
        self.inner.set_row_lower(row, lo - expr.constant);
        self.inner.set_row_upper(row, hi - expr.constant);
    }

    /// Fixes a boolean variable to a constant.
    pub fn fix_bool(&mut self, var: VarId, value: bool) {
        let expr = LinearExpr::var(var);
        self.add_eq(&expr, if value { 1.0 } else { 0.0 });
    }

    /// Asserts `flag = OR(lits)` exactly.
    ///
    /// Encoding: `flag >= lit_i` for every literal, `flag <= Σ lit_i`.
    pub fn add_or_equality(&mut self, flag: VarId, lits: &[VarId]) {
        for &lit in lits {
            let mut expr = LinearExpr::var(flag);
            expr.add_term(lit, -1.0);
            self.add_ge(&expr, 0.0);
        }
        let mut upper = LinearExpr::var(flag);
        for &lit in lits {
            upper.add_term(lit, -1.0);
        }
        self.add_le(&upper, 0.0);
    }

    /// Asserts `flag = 1 ⇔ expr = 0` for a non-negative integer expression
    /// bounded above by `max`.
    ///
    /// Encoding: `expr + max·flag <= max` (flag forces the sum to zero) and
    /// `expr + flag >= 1` (a zero sum forces the flag).
    pub fn add_is_zero_equality(&mut self, flag: VarId, expr: &LinearExpr, max: i64) {
        let mut upper = expr.clone();
        upper.add_term(flag, max as f64);
        self.add_le(&upper, max as f64);

        let mut lower = expr.clone();
        lower.add_term(flag, 1.0);
        self.add_ge(&lower, 1.0);
    }

    /// Asserts `flag = a ∧ ¬b` exactly.
    ///
    /// Encoding: `flag >= a - b`, `flag <= a`, `flag <= 1 - b`.
    pub fn add_and_not_equality(&mut self, flag: VarId, a: VarId, b: VarId) {
        let mut ge = LinearExpr::var(flag);
        ge.add_term(a, -1.0).add_term(b, 1.0);
        self.add_ge(&ge, 0.0);

        let mut le_a = LinearExpr::var(flag);
        le_a.add_term(a, -1.0);
        self.add_le(&le_a, 0.0);

        let mut le_b = LinearExpr::var(flag);
        le_b.add_term(b, 1.0);
        self.add_le(&le_b, 1.0);
    }

    /// Asserts the implication `a → b` (`a <= b`).
    pub fn add_implication(&mut self, a: VarId, b: VarId) {
        let mut expr = LinearExpr::var(a);
        expr.add_term(b, -1.0);
        self.add_le(&expr, 0.0);
    }

    /// Adds `coeff · var` to the minimization objective.
    ///
    /// Coefficients for the same variable accumulate; the objective is
    /// installed once, at solve time. With no terms the model is a pure
    /// feasibility problem with constant objective 0.
    pub fn add_objective_term(&mut self, var: VarId, coeff: f64) {
        *self.objective.entry(var.0).or_insert(0.0) += coeff;
    }

    /// Runs the backend and maps its outcome to the canonical status set.
    pub fn solve(&mut self, params: &SolveParameters) -> (SolveStatus, Option<ModelSolution>) {
        for (&idx, &coeff) in &self.objective {
            self.inner.set_obj_coeff(self.cols[idx], coeff);
        }
        self.inner.set_obj_sense(Sense::Minimize);

        self.inner
            .set_parameter("seconds", &format!("{}", params.time_limit_seconds));
        if let Some(workers) = params.num_search_workers {
            self.inner.set_parameter("threads", &workers.to_string());
        }
        if !params.log_output {
            self.inner.set_parameter("log", "0");
        }

        tracing::debug!(
            variables = self.cols.len(),
            assertions = self.num_rows,
            objective_terms = self.objective.len(),
            time_limit = params.time_limit_seconds,
            "starting backend solve"
        );

        let started = Instant::now();
        let solution = self.inner.solve();
        let elapsed = started.elapsed().as_secs_f64();
        let raw = solution.raw();

        let status = if raw.is_proven_optimal() {
            SolveStatus::Optimal
        } else if raw.is_proven_infeasible() {
            SolveStatus::Infeasible
        } else if raw.obj_value().abs() < NO_INCUMBENT_THRESHOLD {
            SolveStatus::Feasible
        } else {
            SolveStatus::Unknown
        };

        tracing::debug!(status = status.name(), seconds = elapsed, "backend finished");

        if !status.is_success() {
            return (status, None);
        }

        let values = self.cols.iter().map(|&col| solution.col(col)).collect();
        (
            status,
            Some(ModelSolution {
                values,
                objective_value: raw.obj_value(),
                solve_time_seconds: elapsed,
            }),
        )
    }
}
