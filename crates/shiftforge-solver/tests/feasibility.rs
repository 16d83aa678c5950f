//! Analyzer behavior over structurally broken and borderline inputs.

use std::collections::BTreeSet;

use shiftforge_core::{
    Availability, AvailabilityType, OrderDirection, OrderTarget, OrderTrigger, Period,
    ShiftFrequencyRequirement, ShiftOrderPreference, ShiftType, Worker,
};
use shiftforge_solver::{IssueKind, Severity, ShiftSolver};

fn d(day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn shift(id: &str, required: u32) -> ShiftType {
    ShiftType {
        id: id.to_string(),
        name: id.to_string(),
        category: id.to_string(),
        start_time: chrono::NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        duration_hours: 8.0,
        workers_required: required,
        is_undesirable: false,
        applicable_days: None,
    }
}

fn worker(id: &str) -> Worker {
    Worker::new(id, id)
}

fn week(index: usize) -> Period {
    let start = d(5) + chrono::Duration::weeks(index as i64);
    Period::new(index, start, start + chrono::Duration::days(6))
}

#[test]
fn empty_horizon_is_an_error() {
    let solver = ShiftSolver::new(vec![worker("W001")], vec![shift("day", 1)], vec![]);
    let report = solver.analyze();
    assert!(!report.is_feasible);
    assert!(report.issues.iter().any(|i| i.kind == IssueKind::Period));
}

#[test]
fn inverted_period_is_an_error() {
    let solver = ShiftSolver::new(
        vec![worker("W001")],
        vec![shift("day", 1)],
        vec![Period::new(0, d(11), d(5))],
    );
    let report = solver.analyze();
    assert!(!report.is_feasible);
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::Period)
        .unwrap();
    assert_eq!(issue.period_index, Some(0));
}

#[test]
fn no_workers_is_an_error() {
    let solver = ShiftSolver::new(vec![], vec![shift("day", 1)], vec![week(0)]);
    let report = solver.analyze();
    assert!(!report.is_feasible);
    assert!(report.issues.iter().any(|i| i.kind == IssueKind::Coverage));
}

#[test]
fn all_workers_unavailable_in_a_covered_period_is_an_error() {
    let availabilities = vec![
        Availability {
            worker_id: "W001".to_string(),
            start_date: d(5),
            end_date: d(11),
            availability_type: AvailabilityType::Unavailable,
            shift_type_id: None,
        },
        Availability {
            worker_id: "W002".to_string(),
            start_date: d(5),
            end_date: d(11),
            availability_type: AvailabilityType::Unavailable,
            shift_type_id: None,
        },
    ];
    let solver = ShiftSolver::new(
        vec![worker("W001"), worker("W002")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_availabilities(availabilities);

    let report = solver.analyze();
    assert!(!report.is_feasible);
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::Availability)
        .unwrap();
    assert_eq!(issue.period_index, Some(0));
}

#[test]
fn combined_restriction_and_availability_bottleneck_is_detected() {
    // W001 restricted from day, W002 away in period 0: nobody remains.
    let solver = ShiftSolver::new(
        vec![worker("W001").with_restricted_shift("day"), worker("W002")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_availabilities(vec![Availability {
        worker_id: "W002".to_string(),
        start_date: d(5),
        end_date: d(11),
        availability_type: AvailabilityType::Unavailable,
        shift_type_id: None,
    }]);

    let report = solver.analyze();
    assert!(!report.is_feasible);
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::Combined)
        .unwrap();
    assert_eq!(issue.period_index, Some(0));
    assert_eq!(issue.workers_available, Some(0));
    assert_eq!(issue.workers_required, Some(1));
}

#[test]
fn frequency_rule_with_unknown_worker_is_a_warning() {
    let solver = ShiftSolver::new(
        vec![worker("W001")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_frequency_requirements(vec![ShiftFrequencyRequirement {
        worker_id: "W999".to_string(),
        shift_types: BTreeSet::from(["day".to_string()]),
        max_periods_between: 1,
    }]);

    let report = solver.analyze();
    assert!(report.is_feasible);
    let warning = report
        .warnings
        .iter()
        .find(|w| w.kind == IssueKind::ShiftFrequency)
        .unwrap();
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.worker_id.as_deref(), Some("W999"));
}

#[test]
fn frequency_rule_with_only_unknown_shifts_is_an_error() {
    let solver = ShiftSolver::new(
        vec![worker("W001")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_frequency_requirements(vec![ShiftFrequencyRequirement {
        worker_id: "W001".to_string(),
        shift_types: BTreeSet::from(["swing".to_string(), "grave".to_string()]),
        max_periods_between: 1,
    }]);

    let report = solver.analyze();
    assert!(!report.is_feasible);
    assert!(report
        .issues
        .iter()
        .any(|i| i.kind == IssueKind::ShiftFrequency));
}

#[test]
fn frequency_rule_fully_restricted_is_an_error() {
    let solver = ShiftSolver::new(
        vec![worker("W001").with_restricted_shift("day"), worker("W002")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_frequency_requirements(vec![ShiftFrequencyRequirement {
        worker_id: "W001".to_string(),
        shift_types: BTreeSet::from(["day".to_string()]),
        max_periods_between: 1,
    }]);

    let report = solver.analyze();
    assert!(!report.is_feasible);
}

#[test]
fn frequency_window_beyond_horizon_is_a_warning() {
    let solver = ShiftSolver::new(
        vec![worker("W001")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_frequency_requirements(vec![ShiftFrequencyRequirement {
        worker_id: "W001".to_string(),
        shift_types: BTreeSet::from(["day".to_string()]),
        max_periods_between: 5,
    }]);

    let report = solver.analyze();
    assert!(report.is_feasible);
    let warning = report
        .warnings
        .iter()
        .find(|w| w.kind == IssueKind::ShiftFrequency)
        .unwrap();
    assert!(warning.message.contains("no windows"));
}

#[test]
fn short_horizon_turns_order_rules_into_warnings() {
    let solver = ShiftSolver::new(
        vec![worker("W001")],
        vec![shift("day", 1)],
        vec![week(0)],
    )
    .with_order_preferences(vec![ShiftOrderPreference {
        rule_id: "r1".to_string(),
        trigger: OrderTrigger::ShiftType("day".to_string()),
        direction: OrderDirection::After,
        preferred: OrderTarget::ShiftType("day".to_string()),
        priority: 1,
        worker_ids: None,
    }]);

    let report = solver.analyze();
    assert!(report.is_feasible);
    let warning = report
        .warnings
        .iter()
        .find(|w| w.kind == IssueKind::ShiftOrderPreference)
        .unwrap();
    assert_eq!(warning.rule_id.as_deref(), Some("r1"));
}

#[test]
fn order_rule_with_unknown_references_warns_but_does_not_block() {
    let solver = ShiftSolver::new(
        vec![worker("W001")],
        vec![shift("day", 1)],
        vec![week(0), week(1)],
    )
    .with_order_preferences(vec![ShiftOrderPreference {
        rule_id: "r2".to_string(),
        trigger: OrderTrigger::Category("holiday".to_string()),
        direction: OrderDirection::Before,
        preferred: OrderTarget::ShiftType("swing".to_string()),
        priority: 1,
        worker_ids: Some(BTreeSet::from(["W404".to_string()])),
    }]);

    let report = solver.analyze();
    assert!(report.is_feasible);
    // Unknown trigger category, unknown preferred shift, unknown worker id.
    assert_eq!(
        report
            .warnings
            .iter()
            .filter(|w| w.kind == IssueKind::ShiftOrderPreference)
            .count(),
        3
    );
}

#[test]
fn order_rule_with_fully_restricted_scope_warns() {
    let solver = ShiftSolver::new(
        vec![
            worker("W001").with_restricted_shift("night"),
            worker("W002").with_restricted_shift("night"),
        ],
        vec![shift("day", 1), shift("night", 0)],
        vec![week(0), week(1)],
    )
    .with_order_preferences(vec![ShiftOrderPreference {
        rule_id: "r3".to_string(),
        trigger: OrderTrigger::ShiftType("day".to_string()),
        direction: OrderDirection::After,
        preferred: OrderTarget::ShiftType("night".to_string()),
        priority: 1,
        worker_ids: None,
    }]);

    let report = solver.analyze();
    assert!(report.is_feasible);
    assert!(report
        .warnings
        .iter()
        .any(|w| w.message.contains("restricted from preferred shift")));
}

#[test]
fn weekend_only_shift_does_not_require_weekday_coverage() {
    // Monday-to-Friday period; the weekend shift has no applicable day in it.
    let mut weekend = shift("weekend", 2);
    weekend.applicable_days = Some([5u8, 6u8].into_iter().collect());
    let solver = ShiftSolver::new(
        vec![worker("W001"), worker("W002")],
        vec![weekend],
        vec![Period::new(0, d(5), d(9))],
    )
    .with_availabilities(vec![Availability {
        worker_id: "W002".to_string(),
        start_date: d(5),
        end_date: d(9),
        availability_type: AvailabilityType::Unavailable,
        shift_type_id: None,
    }]);

    let report = solver.analyze();
    // One of two workers is away, which would starve the two-worker weekend
    // shift, but the cell never applies inside a Monday-to-Friday period.
    assert!(report.is_feasible, "issues: {:?}", report.issues);
}
