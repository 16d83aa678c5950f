//! Objective weight distribution under growing request volumes.
//!
//! The builder never normalizes, so these tests document how family totals
//! scale and that per-term priorities do what callers expect.

use shiftforge_constraints::{
    ConstraintConfig, ConstraintFamily, FairnessFamily, ModelInput, ObjectiveBuilder,
    RequestFamily,
};
use shiftforge_core::{Period, RequestType, SchedulingRequest, ShiftType, Worker};
use shiftforge_model::{Model, VariableBuilder};

fn d(day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn shift(id: &str, undesirable: bool) -> ShiftType {
    ShiftType {
        id: id.to_string(),
        name: id.to_string(),
        category: id.to_string(),
        start_time: chrono::NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        duration_hours: 8.0,
        workers_required: 1,
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

fn one_week_request(worker: &str, periods: &[Period], week: usize, priority: i64) -> SchedulingRequest {
    SchedulingRequest {
        worker_id: worker.to_string(),
        start_date: periods[week].start_date,
        end_date: periods[week].end_date,
        request_type: RequestType::Positive,
        shift_type_id: "day".to_string(),
        priority,
        is_hard: None,
    }
}

#[test]
fn request_totals_scale_linearly_with_volume() {
    let pool = workers(10);
    let shifts = vec![shift("day", false), shift("night", true)];
    let periods = weekly_periods(10);

    // Ten requests per worker, one hundred in total.
    let requests: Vec<SchedulingRequest> = pool
        .iter()
        .flat_map(|w| (0..10).map(|week| one_week_request(&w.id, &periods, week, 1)))
        .collect();
    assert_eq!(requests.len(), 100);

    let mut model = Model::new();
    let vars = VariableBuilder::new(&pool, &shifts, 10).build(&mut model);

    let mut fairness = FairnessFamily::new(ConstraintConfig::soft(1000));
    let mut request = RequestFamily::new(ConstraintConfig::soft(150));
    let mut input = ModelInput::basic(&pool, &shifts, &periods);
    input.requests = &requests;
    fairness.apply(&mut model, &vars, &input).unwrap();
    request.apply(&mut model, &vars, &input).unwrap();

    let mut builder = ObjectiveBuilder::new();
    builder.add_family(&fairness);
    builder.add_family(&request);

    let totals = builder.total_weight_by_family();
    assert_eq!(totals.get("request"), Some(&(100 * 150)));
    // Many requests can outweigh fairness; the builder does not rescale.
    assert!(totals["request"] > totals["fairness"]);
}

#[test]
fn priority_multiplies_into_the_effective_weight() {
    let pool = workers(4);
    let shifts = vec![shift("day", false)];
    let periods = weekly_periods(4);

    let requests: Vec<SchedulingRequest> = pool
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let priority = if i < 2 { 1 } else { 3 };
            one_week_request(&w.id, &periods, i, priority)
        })
        .collect();

    let mut model = Model::new();
    let vars = VariableBuilder::new(&pool, &shifts, 4).build(&mut model);
    let mut request = RequestFamily::new(ConstraintConfig::soft(150));
    let mut input = ModelInput::basic(&pool, &shifts, &periods);
    input.requests = &requests;
    request.apply(&mut model, &vars, &input).unwrap();

    let mut builder = ObjectiveBuilder::new();
    builder.add_family(&request);

    let breakdown = builder.breakdown();
    let terms = breakdown.get("request").unwrap();
    let low: Vec<_> = terms.iter().filter(|t| t.priority_multiplier == 1).collect();
    let high: Vec<_> = terms.iter().filter(|t| t.priority_multiplier == 3).collect();
    assert_eq!(low.len(), 2);
    assert_eq!(high.len(), 2);
    assert!(low.iter().all(|t| t.effective_weight == 150));
    assert!(high.iter().all(|t| t.effective_weight == 450));
}

#[test]
fn a_request_spanning_the_horizon_creates_one_term_per_period() {
    let pool = workers(2);
    let shifts = vec![shift("day", false)];
    let periods = weekly_periods(4);

    let requests = vec![SchedulingRequest {
        worker_id: "W001".to_string(),
        start_date: periods[0].start_date,
        end_date: periods[3].end_date,
        request_type: RequestType::Positive,
        shift_type_id: "day".to_string(),
        priority: 1,
        is_hard: None,
    }];

    let mut model = Model::new();
    let vars = VariableBuilder::new(&pool, &shifts, 4).build(&mut model);
    let mut request = RequestFamily::new(ConstraintConfig::soft(100));
    let mut input = ModelInput::basic(&pool, &shifts, &periods);
    input.requests = &requests;
    request.apply(&mut model, &vars, &input).unwrap();

    let mut builder = ObjectiveBuilder::new();
    builder.add_family(&request);
    assert_eq!(builder.terms().len(), 4);
}

#[test]
fn five_hundred_requests_build_without_strain() {
    let pool = workers(20);
    let shifts = vec![shift("day", false), shift("night", true)];
    let periods = weekly_periods(26);

    let requests: Vec<SchedulingRequest> = pool
        .iter()
        .flat_map(|w| (0..26).map(|week| one_week_request(&w.id, &periods, week, 1)))
        .collect();
    assert!(requests.len() >= 500);

    let mut model = Model::new();
    let vars = VariableBuilder::new(&pool, &shifts, 26).build(&mut model);
    let mut request = RequestFamily::new(ConstraintConfig::soft(150));
    let mut input = ModelInput::basic(&pool, &shifts, &periods);
    input.requests = &requests;
    request.apply(&mut model, &vars, &input).unwrap();

    let mut builder = ObjectiveBuilder::new();
    builder.add_family(&request);
    assert_eq!(builder.terms().len(), 520);
    assert_eq!(
        builder.total_weight_by_family().get("request"),
        Some(&(520 * 150))
    );
}
