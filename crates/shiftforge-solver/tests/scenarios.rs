//! End-to-end solves over small literal problems.

use std::collections::BTreeSet;

use shiftforge_constraints::{ConstraintSettings, ModelInput};
use shiftforge_core::{
    Availability, AvailabilityType, OrderDirection, OrderTarget, OrderTrigger, Period,
    RequestType, SchedulingRequest, ShiftOrderPreference, ShiftType, Worker,
};
use shiftforge_solver::{ScheduleValidator, ShiftSolver, SolveOptions};

fn d(day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn shift(id: &str, category: &str, required: u32, undesirable: bool) -> ShiftType {
    ShiftType {
        id: id.to_string(),
        name: id.to_string(),
        category: category.to_string(),
        start_time: chrono::NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        duration_hours: 8.0,
        workers_required: required,
        is_undesirable: undesirable,
        applicable_days: None,
    }
}

fn workers(count: usize) -> Vec<Worker> {
    (1..=count)
        .map(|i| Worker::new(format!("W{i:03}"), format!("Worker {i}")))
        .collect()
}

fn weekly_periods(count: usize) -> Vec<Period> {
    (0..count)
        .map(|i| {
            let start = d(5) + chrono::Duration::weeks(i as i64);
            Period::new(i, start, start + chrono::Duration::days(6))
        })
        .collect()
}

fn options() -> SolveOptions {
    SolveOptions::with_time_limit(30.0)
}

#[test]
fn trivial_single_worker_problem_assigns_the_worker() {
    let solver = ShiftSolver::new(
        workers(1),
        vec![shift("day", "day", 1, false)],
        weekly_periods(1),
    );
    let result = solver.solve(&options()).unwrap();

    assert!(result.success);
    assert_eq!(result.status_name, "OPTIMAL");
    let schedule = result.schedule.unwrap();
    assert!(schedule.periods[0].is_assigned("W001", "day"));
    assert_eq!(schedule.statistics["W001"].total_shifts, 1);
}

#[test]
fn exact_coverage_assigns_everybody() {
    let solver = ShiftSolver::new(
        workers(3),
        vec![shift("day", "day", 3, false)],
        weekly_periods(1),
    );
    let result = solver.solve(&options()).unwrap();

    assert!(result.success);
    let schedule = result.schedule.unwrap();
    for id in ["W001", "W002", "W003"] {
        assert!(schedule.periods[0].is_assigned(id, "day"));
    }
}

#[test]
fn one_worker_short_is_rejected_by_the_analyzer() {
    let solver = ShiftSolver::new(
        workers(2),
        vec![shift("day", "day", 3, false)],
        weekly_periods(1),
    );

    let report = solver.analyze();
    assert!(!report.is_feasible);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i.kind, shiftforge_solver::IssueKind::Coverage)));

    let result = solver.solve(&options()).unwrap();
    assert!(!result.success);
    assert_eq!(result.status_name, "INFEASIBLE");
    assert!(result.schedule.is_none());
}

#[test]
fn one_worker_short_hits_the_backend_when_analysis_is_skipped() {
    let solver = ShiftSolver::new(
        workers(2),
        vec![shift("day", "day", 3, false)],
        weekly_periods(1),
    );
    let mut options = options();
    options.skip_feasibility_check = true;
    let result = solver.solve(&options).unwrap();

    assert!(!result.success);
    assert_eq!(result.status_name, "INFEASIBLE");
}

#[test]
fn restricted_bottleneck_is_reported_with_counts() {
    let mut pool = workers(3);
    pool[0].restricted_shifts.insert("night".to_string());
    pool[1].restricted_shifts.insert("night".to_string());
    let solver = ShiftSolver::new(
        pool,
        vec![shift("night", "night", 2, true)],
        weekly_periods(1),
    );

    let report = solver.analyze();
    assert!(!report.is_feasible);
    let issue = report
        .issues
        .iter()
        .find(|i| matches!(i.kind, shiftforge_solver::IssueKind::Restriction))
        .expect("restriction issue");
    assert_eq!(issue.workers_available, Some(1));
    assert_eq!(issue.workers_required, Some(2));
    assert!(issue.message.contains("1 available, 2 required"));
}

#[test]
fn soft_positive_request_loses_to_hard_unavailability() {
    let solver = ShiftSolver::new(
        workers(2),
        vec![shift("day", "day", 1, false)],
        weekly_periods(1),
    )
    .with_availabilities(vec![Availability {
        worker_id: "W001".to_string(),
        start_date: d(5),
        end_date: d(11),
        availability_type: AvailabilityType::Unavailable,
        shift_type_id: None,
    }])
    .with_requests(vec![SchedulingRequest {
        worker_id: "W001".to_string(),
        start_date: d(5),
        end_date: d(11),
        request_type: RequestType::Positive,
        shift_type_id: "day".to_string(),
        priority: 1,
        is_hard: None,
    }]);

    let result = solver.solve(&options()).unwrap();
    assert!(result.success);
    let schedule = result.schedule.as_ref().unwrap();
    assert!(!schedule.periods[0].is_assigned("W001", "day"));
    assert!(schedule.periods[0].is_assigned("W002", "day"));

    // Exactly the one ignored request term is paid for.
    let settings = ConstraintSettings::default();
    assert_eq!(
        result.objective_value.map(|v| v.round() as i64),
        Some(settings.request.weight)
    );
}

#[test]
fn fairness_keeps_night_spread_within_one() {
    let solver = ShiftSolver::new(
        workers(6),
        vec![
            shift("day", "day", 2, false),
            shift("night", "night", 1, true),
        ],
        weekly_periods(4),
    );

    let result = solver.solve(&options()).unwrap();
    assert!(result.success);
    let schedule = result.schedule.unwrap();

    let counts: Vec<usize> = (1..=6)
        .map(|i| {
            let id = format!("W{i:03}");
            schedule
                .statistics
                .get(&id)
                .map(|s| *s.by_category.get("night").unwrap_or(&0))
                .unwrap_or(0)
        })
        .collect();
    let spread = counts.iter().max().unwrap() - counts.iter().min().unwrap();
    assert!(spread <= 1, "unfair night distribution: {counts:?}");
}

#[test]
fn order_preference_pulls_night_after_weekend() {
    let mut settings = ConstraintSettings::default();
    settings.shift_order_preference.weight = 1000;

    let solver = ShiftSolver::new(
        workers(3),
        vec![
            shift("weekend", "weekend", 1, false),
            shift("night", "night", 1, true),
        ],
        weekly_periods(2),
    )
    .with_requests(vec![SchedulingRequest {
        worker_id: "W001".to_string(),
        start_date: d(5),
        end_date: d(11),
        request_type: RequestType::Positive,
        shift_type_id: "weekend".to_string(),
        priority: 1,
        is_hard: Some(true),
    }])
    .with_order_preferences(vec![ShiftOrderPreference {
        rule_id: "night_after_weekend".to_string(),
        trigger: OrderTrigger::Category("weekend".to_string()),
        direction: OrderDirection::After,
        preferred: OrderTarget::ShiftType("night".to_string()),
        priority: 1,
        worker_ids: None,
    }])
    .with_settings(settings);

    let result = solver.solve(&options()).unwrap();
    assert!(result.success);
    let schedule = result.schedule.unwrap();
    assert!(schedule.periods[0].is_assigned("W001", "weekend"));
    assert!(schedule.periods[1].is_assigned("W001", "night"));
}

#[test]
fn frequency_requirement_spreads_assignments() {
    let solver = ShiftSolver::new(
        workers(2),
        vec![shift("day", "day", 1, false)],
        weekly_periods(4),
    )
    .with_frequency_requirements(vec![shiftforge_core::ShiftFrequencyRequirement {
        worker_id: "W001".to_string(),
        shift_types: BTreeSet::from(["day".to_string()]),
        max_periods_between: 1,
    }]);

    let result = solver.solve(&options()).unwrap();
    assert!(result.success);
    let schedule = result.schedule.unwrap();

    // Windows of two consecutive periods must each contain W001 at least
    // once for the objective to stay at zero; with weight 500 against no
    // competing soft terms the solver satisfies all of them.
    assert_eq!(result.objective_value.map(|v| v.round() as i64), Some(0));
    for pair in 0..3 {
        let held = schedule.periods[pair].is_assigned("W001", "day")
            || schedule.periods[pair + 1].is_assigned("W001", "day");
        assert!(held, "W001 absent for windows starting at {pair}");
    }
}

#[test]
fn fresh_schedules_validate_cleanly() {
    let pool = workers(4);
    let shifts = vec![
        shift("day", "day", 2, false),
        shift("night", "night", 1, true),
    ];
    let periods = weekly_periods(3);
    let availabilities = vec![Availability {
        worker_id: "W004".to_string(),
        start_date: d(5),
        end_date: d(11),
        availability_type: AvailabilityType::Unavailable,
        shift_type_id: None,
    }];
    let requests = vec![SchedulingRequest {
        worker_id: "W002".to_string(),
        start_date: d(12),
        end_date: d(18),
        request_type: RequestType::Negative,
        shift_type_id: "night".to_string(),
        priority: 2,
        is_hard: Some(true),
    }];

    let solver = ShiftSolver::new(pool.clone(), shifts.clone(), periods.clone())
        .with_availabilities(availabilities.clone())
        .with_requests(requests.clone());
    let result = solver.solve(&options()).unwrap();
    assert!(result.success);
    let schedule = result.schedule.unwrap();

    let settings = ConstraintSettings::default();
    let mut input = ModelInput::basic(&pool, &shifts, &periods);
    input.availabilities = &availabilities;
    input.requests = &requests;
    let validator = ScheduleValidator::new(input, &settings);
    let violations = validator.validate(&schedule);
    assert!(violations.is_empty(), "unexpected violations: {violations:?}");
}

#[test]
fn repeated_optimal_solves_agree_on_objective_value() {
    let build = || {
        ShiftSolver::new(
            workers(4),
            vec![
                shift("day", "day", 2, false),
                shift("night", "night", 1, true),
            ],
            weekly_periods(3),
        )
        .with_requests(vec![SchedulingRequest {
            worker_id: "W001".to_string(),
            start_date: d(5),
            end_date: d(25),
            request_type: RequestType::Negative,
            shift_type_id: "night".to_string(),
            priority: 1,
            is_hard: None,
        }])
    };

    let first = build().solve(&options()).unwrap();
    let second = build().solve(&options()).unwrap();
    assert_eq!(first.status_name, "OPTIMAL");
    assert_eq!(second.status_name, "OPTIMAL");
    assert_eq!(
        first.objective_value.map(|v| v.round() as i64),
        second.objective_value.map(|v| v.round() as i64)
    );
}
