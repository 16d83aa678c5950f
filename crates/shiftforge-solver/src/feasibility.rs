//! Pre-solve feasibility analysis.
//!
//! Cheap structural checks that reject obviously unsatisfiable inputs
//! before any model is built. The analyzer never guesses intent:
//! borderline configurations surface as warnings and the solve proceeds.

use serde::Serialize;
use shiftforge_constraints::ModelInput;
use shiftforge_core::{OrderTarget, OrderTrigger, Worker};

/// Issue categories, one per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Period,
    Coverage,
    Restriction,
    Availability,
    Combined,
    ShiftFrequency,
    ShiftOrderPreference,
}

/// Whether an issue blocks solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding of the analyzer with its typed details.
#[derive(Debug, Clone, Serialize)]
pub struct FeasibilityIssue {
    /// Which check produced the issue.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers_available: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers_required: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl FeasibilityIssue {
    fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        FeasibilityIssue {
            kind,
            severity,
            message: message.into(),
            period_index: None,
            shift_type_id: None,
            worker_id: None,
            workers_available: None,
            workers_required: None,
            rule_id: None,
        }
    }
}

/// Outcome of the analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeasibilityReport {
    /// False as soon as any error-severity issue is recorded.
    pub is_feasible: bool,
    /// Blocking issues.
    pub issues: Vec<FeasibilityIssue>,
    /// Non-blocking findings.
    pub warnings: Vec<FeasibilityIssue>,
}

impl FeasibilityReport {
    fn new() -> Self {
        FeasibilityReport {
            is_feasible: true,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add_issue(&mut self, issue: FeasibilityIssue) {
        if issue.severity == Severity::Error {
            self.is_feasible = false;
        }
        self.issues.push(issue);
    }

    fn add_warning(&mut self, issue: FeasibilityIssue) {
        self.warnings.push(issue);
    }
}

/// Runs the structural checks over one solve's inputs.
pub struct FeasibilityChecker<'a> {
    input: ModelInput<'a>,
}

impl<'a> FeasibilityChecker<'a> {
    /// Creates a checker over the given inputs.
    pub fn new(input: ModelInput<'a>) -> Self {
        FeasibilityChecker { input }
    }

    /// Runs every check, in order, and returns the report.
    pub fn check(&self) -> FeasibilityReport {
        let mut report = FeasibilityReport::new();

        self.check_periods(&mut report);
        self.check_basic_coverage(&mut report);
        self.check_restrictions(&mut report);
        self.check_availability_conflicts(&mut report);
        self.check_combined(&mut report);
        self.check_frequency_requirements(&mut report);
        self.check_order_preferences(&mut report);

        if report.is_feasible {
            tracing::info!(warnings = report.warnings.len(), "feasibility check passed");
        } else {
            tracing::warn!(issues = report.issues.len(), "feasibility check failed");
            for issue in &report.issues {
                tracing::warn!(kind = ?issue.kind, "  - {}", issue.message);
            }
        }
        report
    }

    fn check_periods(&self, report: &mut FeasibilityReport) {
        if self.input.periods.is_empty() {
            report.add_issue(FeasibilityIssue::new(
                IssueKind::Period,
                Severity::Error,
                "no scheduling periods defined",
            ));
            return;
        }
        for period in self.input.periods {
            if period.end_date < period.start_date {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::Period,
                    Severity::Error,
                    format!("period {} has end date before start date", period.index),
                );
                issue.period_index = Some(period.index);
                report.add_issue(issue);
            }
        }
    }

    fn check_basic_coverage(&self, report: &mut FeasibilityReport) {
        if self.input.workers.is_empty() {
            report.add_issue(FeasibilityIssue::new(
                IssueKind::Coverage,
                Severity::Error,
                "no workers defined",
            ));
            return;
        }
        let max_required = self
            .input
            .shift_types
            .iter()
            .map(|s| s.workers_required as usize)
            .max()
            .unwrap_or(0);
        if self.input.workers.len() < max_required {
            let mut issue = FeasibilityIssue::new(
                IssueKind::Coverage,
                Severity::Error,
                format!(
                    "not enough workers ({}) for shift requiring {} workers",
                    self.input.workers.len(),
                    max_required
                ),
            );
            issue.workers_available = Some(self.input.workers.len());
            issue.workers_required = Some(max_required);
            report.add_issue(issue);
        }
    }

    fn check_restrictions(&self, report: &mut FeasibilityReport) {
        for shift_type in self.input.shift_types {
            let available = self
                .input
                .workers
                .iter()
                .filter(|w| w.can_work_shift(&shift_type.id))
                .count();
            let required = shift_type.workers_required as usize;
            if available < required {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::Restriction,
                    Severity::Error,
                    format!(
                        "not enough workers can work shift '{}': {available} available, \
                         {required} required",
                        shift_type.name
                    ),
                );
                issue.shift_type_id = Some(shift_type.id.clone());
                issue.workers_available = Some(available);
                issue.workers_required = Some(required);
                report.add_issue(issue);
            }
        }
    }

    /// Worker ids with an `unavailable` record overlapping the period.
    fn unavailable_workers_in(&self, period_index: usize) -> Vec<&str> {
        let period = &self.input.periods[period_index];
        let mut ids: Vec<&str> = self
            .input
            .availabilities
            .iter()
            .filter(|a| a.is_unavailable() && a.covers(period.start_date, period.end_date))
            .map(|a| a.worker_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn period_needs_coverage(&self, period_index: usize) -> bool {
        let period = &self.input.periods[period_index];
        self.input.shift_types.iter().any(|s| {
            s.workers_required > 0
                && s.applicable_day_count(period.start_date, period.end_date) > 0
        })
    }

    fn check_availability_conflicts(&self, report: &mut FeasibilityReport) {
        if self.input.availabilities.is_empty() {
            return;
        }
        for period in self.input.periods {
            if !self.period_needs_coverage(period.index) {
                continue;
            }
            let unavailable = self.unavailable_workers_in(period.index);
            let any_available = self
                .input
                .workers
                .iter()
                .any(|w| !unavailable.contains(&w.id.as_str()));
            if !any_available {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::Availability,
                    Severity::Error,
                    format!(
                        "all workers unavailable for period {} ({} to {})",
                        period.index, period.start_date, period.end_date
                    ),
                );
                issue.period_index = Some(period.index);
                report.add_issue(issue);
            }
        }
    }

    fn check_combined(&self, report: &mut FeasibilityReport) {
        // Fundamental issues already explain the infeasibility; the detailed
        // sweep would only repeat them per cell.
        if !report.issues.is_empty() {
            return;
        }

        for period in self.input.periods {
            let unavailable = self.unavailable_workers_in(period.index);
            for shift_type in self.input.shift_types {
                if shift_type.applicable_day_count(period.start_date, period.end_date) == 0 {
                    continue;
                }
                let required = shift_type.workers_required as usize;
                if required == 0 {
                    continue;
                }
                let available = self
                    .input
                    .workers
                    .iter()
                    .filter(|w| {
                        !unavailable.contains(&w.id.as_str())
                            && w.can_work_shift(&shift_type.id)
                    })
                    .count();
                if available < required {
                    let mut issue = FeasibilityIssue::new(
                        IssueKind::Combined,
                        Severity::Error,
                        format!(
                            "period {}: not enough workers for shift '{}' after restrictions \
                             and availability: {available} available, {required} required",
                            period.index, shift_type.name
                        ),
                    );
                    issue.period_index = Some(period.index);
                    issue.shift_type_id = Some(shift_type.id.clone());
                    issue.workers_available = Some(available);
                    issue.workers_required = Some(required);
                    report.add_issue(issue);
                }
            }
        }
    }

    fn check_frequency_requirements(&self, report: &mut FeasibilityReport) {
        let num_periods = self.input.periods.len();
        for req in self.input.frequency_requirements {
            let Some(worker) = self.find_worker(&req.worker_id) else {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::ShiftFrequency,
                    Severity::Warning,
                    format!(
                        "shift frequency requirement references unknown worker '{}'",
                        req.worker_id
                    ),
                );
                issue.worker_id = Some(req.worker_id.clone());
                report.add_warning(issue);
                continue;
            };

            let known: Vec<&str> = req
                .shift_types
                .iter()
                .filter(|s| self.input.shift_types.iter().any(|t| &t.id == *s))
                .map(String::as_str)
                .collect();
            if known.is_empty() {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::ShiftFrequency,
                    Severity::Error,
                    format!(
                        "shift frequency requirement for worker '{}' references only \
                         unknown shift types",
                        req.worker_id
                    ),
                );
                issue.worker_id = Some(req.worker_id.clone());
                report.add_issue(issue);
                continue;
            }

            if !known.iter().any(|s| worker.can_work_shift(s)) {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::ShiftFrequency,
                    Severity::Error,
                    format!(
                        "worker '{}' has a shift frequency requirement but is restricted \
                         from all of its shift types",
                        req.worker_id
                    ),
                );
                issue.worker_id = Some(req.worker_id.clone());
                report.add_issue(issue);
            }

            if req.max_periods_between + 1 > num_periods {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::ShiftFrequency,
                    Severity::Warning,
                    format!(
                        "worker '{}' has max_periods_between={} but the schedule has only \
                         {num_periods} periods; the rule will emit no windows",
                        req.worker_id, req.max_periods_between
                    ),
                );
                issue.worker_id = Some(req.worker_id.clone());
                report.add_warning(issue);
            }
        }
    }

    fn check_order_preferences(&self, report: &mut FeasibilityReport) {
        if self.input.order_preferences.is_empty() {
            return;
        }
        let num_periods = self.input.periods.len();
        if num_periods < 2 {
            for rule in self.input.order_preferences {
                let mut issue = FeasibilityIssue::new(
                    IssueKind::ShiftOrderPreference,
                    Severity::Warning,
                    format!(
                        "rule '{}': schedule has fewer than 2 periods, rule will have no effect",
                        rule.rule_id
                    ),
                );
                issue.rule_id = Some(rule.rule_id.clone());
                report.add_warning(issue);
            }
            return;
        }

        for rule in self.input.order_preferences {
            match &rule.trigger {
                OrderTrigger::ShiftType(id) if !self.shift_type_known(id) => {
                    self.warn_rule(report, rule.rule_id.as_str(), format!(
                        "rule '{}': unknown trigger shift type '{id}'", rule.rule_id
                    ));
                }
                OrderTrigger::Category(c) if !self.category_known(c) => {
                    self.warn_rule(report, rule.rule_id.as_str(), format!(
                        "rule '{}': unknown trigger category '{c}'", rule.rule_id
                    ));
                }
                _ => {}
            }

            match &rule.preferred {
                OrderTarget::ShiftType(id) if !self.shift_type_known(id) => {
                    self.warn_rule(report, rule.rule_id.as_str(), format!(
                        "rule '{}': unknown preferred shift type '{id}'", rule.rule_id
                    ));
                }
                OrderTarget::Category(c) if !self.category_known(c) => {
                    self.warn_rule(report, rule.rule_id.as_str(), format!(
                        "rule '{}': unknown preferred category '{c}'", rule.rule_id
                    ));
                }
                _ => {}
            }

            if let Some(worker_ids) = &rule.worker_ids {
                let unknown: Vec<&str> = worker_ids
                    .iter()
                    .filter(|id| self.find_worker(id).is_none())
                    .map(String::as_str)
                    .collect();
                if !unknown.is_empty() {
                    self.warn_rule(report, rule.rule_id.as_str(), format!(
                        "rule '{}': unknown worker ids: {unknown:?}", rule.rule_id
                    ));
                }
            }

            // Nobody in scope can ever take the preferred shift.
            if let OrderTarget::ShiftType(id) = &rule.preferred {
                if self.shift_type_known(id) {
                    let in_scope: Vec<&Worker> = self
                        .input
                        .workers
                        .iter()
                        .filter(|w| rule.applies_to(&w.id))
                        .collect();
                    if !in_scope.is_empty() && in_scope.iter().all(|w| !w.can_work_shift(id)) {
                        self.warn_rule(report, rule.rule_id.as_str(), format!(
                            "rule '{}': all applicable workers are restricted from \
                             preferred shift '{id}'",
                            rule.rule_id
                        ));
                    }
                }
            }
        }
    }

    fn warn_rule(&self, report: &mut FeasibilityReport, rule_id: &str, message: String) {
        let mut issue =
            FeasibilityIssue::new(IssueKind::ShiftOrderPreference, Severity::Warning, message);
        issue.rule_id = Some(rule_id.to_string());
        report.add_warning(issue);
    }

    fn find_worker(&self, worker_id: &str) -> Option<&Worker> {
        self.input.workers.iter().find(|w| w.id == worker_id)
    }

    fn shift_type_known(&self, shift_type_id: &str) -> bool {
        self.input.shift_types.iter().any(|s| s.id == shift_type_id)
    }

    fn category_known(&self, category: &str) -> bool {
        self.input.shift_types.iter().any(|s| s.category == category)
    }
}
