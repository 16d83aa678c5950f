//! Families exercised through real backend solves.
//!
//! Unit tests in each family module count variables and assertions; these
//! tests check that the emitted sub-models actually steer the solver.

use shiftforge_constraints::{
    ConstraintConfig, ConstraintFamily, CoverageFamily, FairnessFamily, ModelInput,
    ObjectiveBuilder, ShiftFrequencyFamily, ShiftOrderFamily,
};
use shiftforge_core::{
    OrderDirection, OrderTarget, OrderTrigger, Period, ShiftFrequencyRequirement,
    ShiftOrderPreference, ShiftType, Worker,
};
use shiftforge_model::{Model, SolveParameters, SolveStatus, VariableBuilder};

fn d(day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn shift(id: &str, category: &str, required: u32) -> ShiftType {
    ShiftType {
        id: id.to_string(),
        name: id.to_string(),
        category: category.to_string(),
        start_time: chrono::NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        duration_hours: 8.0,
        workers_required: required,
        is_undesirable: category == "night",
        applicable_days: None,
    }
}

fn weekly_periods(count: usize) -> Vec<Period> {
    (0..count)
        .map(|i| {
            let start = d(5) + chrono::Duration::weeks(i as i64);
            Period::new(i, start, start + chrono::Duration::days(6))
        })
        .collect()
}

fn quick() -> SolveParameters {
    SolveParameters {
        time_limit_seconds: 20.0,
        num_search_workers: None,
        log_output: false,
    }
}

#[test]
fn hard_frequency_places_the_worker_in_every_window() {
    let workers = vec![Worker::new("W001", "W001")];
    let shifts = vec![shift("day", "day", 0)];
    let periods = weekly_periods(4);
    let requirements = vec![ShiftFrequencyRequirement {
        worker_id: "W001".to_string(),
        shift_types: ["day".to_string()].into_iter().collect(),
        max_periods_between: 1,
    }];

    let mut model = Model::new();
    let vars = VariableBuilder::new(&workers, &shifts, 4).build(&mut model);
    let mut family = ShiftFrequencyFamily::new(ConstraintConfig::hard());
    let mut input = ModelInput::basic(&workers, &shifts, &periods);
    input.frequency_requirements = &requirements;
    family.apply(&mut model, &vars, &input).unwrap();

    let (status, solution) = model.solve(&quick());
    assert_eq!(status, SolveStatus::Optimal);
    let solution = solution.unwrap();

    for window in 0..3 {
        let present = solution.bool_value(vars.assignment("W001", window, "day"))
            || solution.bool_value(vars.assignment("W001", window + 1, "day"));
        assert!(present, "window starting at {window} is empty");
    }
}

#[test]
fn soft_order_preference_pulls_the_preferred_shift() {
    let workers = vec![
        Worker::new("W001", "W001"),
        Worker::new("W002", "W002"),
        Worker::new("W003", "W003"),
    ];
    let shifts = vec![
        shift("day_shift", "day", 1),
        shift("night_shift", "night", 1),
        shift("weekend_shift", "weekend", 1),
    ];
    let periods = weekly_periods(4);
    let rules = vec![ShiftOrderPreference {
        rule_id: "day_then_night".to_string(),
        trigger: OrderTrigger::ShiftType("day_shift".to_string()),
        direction: OrderDirection::After,
        preferred: OrderTarget::ShiftType("night_shift".to_string()),
        priority: 1,
        worker_ids: None,
    }];

    let mut model = Model::new();
    let vars = VariableBuilder::new(&workers, &shifts, 4).build(&mut model);

    let mut coverage = CoverageFamily::default();
    let mut input = ModelInput::basic(&workers, &shifts, &periods);
    input.order_preferences = &rules;
    coverage.apply(&mut model, &vars, &input).unwrap();

    let mut order = ShiftOrderFamily::new(ConstraintConfig::soft(1000));
    order.apply(&mut model, &vars, &input).unwrap();

    // Pin the trigger: W001 works the day shift in period 0.
    model.fix_bool(vars.assignment("W001", 0, "day_shift"), true);

    let mut objective = ObjectiveBuilder::new();
    objective.add_family(&order);
    objective.build(&mut model);

    let (status, solution) = model.solve(&quick());
    assert!(status.is_success());
    let solution = solution.unwrap();
    assert!(solution.bool_value(vars.assignment("W001", 1, "night_shift")));
}

#[test]
fn fairness_reaches_zero_spread_when_the_load_divides() {
    let workers = vec![Worker::new("W001", "W001"), Worker::new("W002", "W002")];
    let shifts = vec![shift("night", "night", 1)];
    let periods = weekly_periods(4);

    let mut model = Model::new();
    let vars = VariableBuilder::new(&workers, &shifts, 4).build(&mut model);
    let input = ModelInput::basic(&workers, &shifts, &periods);

    let mut coverage = CoverageFamily::default();
    coverage.apply(&mut model, &vars, &input).unwrap();
    let mut fairness = FairnessFamily::new(ConstraintConfig::soft(500));
    fairness.apply(&mut model, &vars, &input).unwrap();

    let mut objective = ObjectiveBuilder::new();
    objective.add_family(&fairness);
    objective.build(&mut model);

    let (status, solution) = model.solve(&quick());
    assert_eq!(status, SolveStatus::Optimal);
    let solution = solution.unwrap();
    // Four nights over two workers: two each, spread zero.
    assert_eq!(solution.objective_value().round() as i64, 0);
    let w001_nights = (0..4)
        .filter(|&p| solution.bool_value(vars.assignment("W001", p, "night")))
        .count();
    assert_eq!(w001_nights, 2);
}
