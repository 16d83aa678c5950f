//! The solver driver: model assembly, backend run, reconstruction.

use std::collections::BTreeMap;

use shiftforge_constraints::{
    AvailabilityFamily, ConstraintError, ConstraintFamily, ConstraintSettings, CoverageFamily,
    FairnessFamily, MaxAbsenceFamily, ModelInput, ObjectiveBuilder, RequestFamily,
    RestrictionFamily, SequenceFamily, ShiftFrequencyFamily, ShiftOrderFamily,
};
use shiftforge_core::{
    Availability, Period, Schedule, SchedulePeriod, SchedulingRequest, ShiftFrequencyRequirement,
    ShiftInstance, ShiftOrderPreference, ShiftType, Worker, WorkerStatistics,
};
use shiftforge_model::{Model, ModelSolution, SolveParameters, VariableBuilder, Variables};
use thiserror::Error;

use crate::feasibility::FeasibilityChecker;
use crate::result::{SolveOptions, SolveResult};

/// Errors the driver can raise before or during model construction.
///
/// Infeasibility is not among them: it is reported through
/// [`SolveResult`], never as an error.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A constraint family rejected its configuration.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

/// Owns one scheduling problem and drives solves over it.
///
/// The solver holds only input records; each call to [`solve`](Self::solve)
/// builds a fresh model and discards it afterwards.
pub struct ShiftSolver {
    workers: Vec<Worker>,
    shift_types: Vec<ShiftType>,
    periods: Vec<Period>,
    availabilities: Vec<Availability>,
    requests: Vec<SchedulingRequest>,
    frequency_requirements: Vec<ShiftFrequencyRequirement>,
    order_preferences: Vec<ShiftOrderPreference>,
    settings: ConstraintSettings,
    schedule_id: String,
}

impl ShiftSolver {
    /// Creates a solver over the mandatory inputs.
    pub fn new(workers: Vec<Worker>, shift_types: Vec<ShiftType>, periods: Vec<Period>) -> Self {
        let schedule_id = periods
            .first()
            .map(|p| format!("SCH-{}", p.start_date.format("%Y%m%d")))
            .unwrap_or_else(|| "SCH".to_string());
        ShiftSolver {
            workers,
            shift_types,
            periods,
            availabilities: Vec::new(),
            requests: Vec::new(),
            frequency_requirements: Vec::new(),
            order_preferences: Vec::new(),
            settings: ConstraintSettings::default(),
            schedule_id,
        }
    }

    /// Sets the availability records.
    pub fn with_availabilities(mut self, availabilities: Vec<Availability>) -> Self {
        self.availabilities = availabilities;
        self
    }

    /// Sets the scheduling requests.
    pub fn with_requests(mut self, requests: Vec<SchedulingRequest>) -> Self {
        self.requests = requests;
        self
    }

    /// Sets the shift frequency requirements.
    pub fn with_frequency_requirements(
        mut self,
        requirements: Vec<ShiftFrequencyRequirement>,
    ) -> Self {
        self.frequency_requirements = requirements;
        self
    }

    /// Sets the shift order preferences.
    pub fn with_order_preferences(mut self, preferences: Vec<ShiftOrderPreference>) -> Self {
        self.order_preferences = preferences;
        self
    }

    /// Replaces the constraint settings.
    pub fn with_settings(mut self, settings: ConstraintSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Overrides the schedule id used in results and log tagging.
    pub fn with_schedule_id(mut self, schedule_id: impl Into<String>) -> Self {
        self.schedule_id = schedule_id.into();
        self
    }

    /// The constraint settings in effect.
    pub fn settings(&self) -> &ConstraintSettings {
        &self.settings
    }

    fn input(&self) -> ModelInput<'_> {
        ModelInput {
            workers: &self.workers,
            shift_types: &self.shift_types,
            periods: &self.periods,
            availabilities: &self.availabilities,
            requests: &self.requests,
            frequency_requirements: &self.frequency_requirements,
            order_preferences: &self.order_preferences,
        }
    }

    /// Runs only the pre-solve analysis.
    pub fn analyze(&self) -> crate::feasibility::FeasibilityReport {
        FeasibilityChecker::new(self.input()).check()
    }

    fn families(&self) -> Vec<Box<dyn ConstraintFamily>> {
        vec![
            Box::new(CoverageFamily::new(self.settings.coverage.clone())),
            Box::new(RestrictionFamily::new(self.settings.restriction.clone())),
            Box::new(AvailabilityFamily::new(self.settings.availability.clone())),
            Box::new(RequestFamily::new(self.settings.request.clone())),
            Box::new(FairnessFamily::new(self.settings.fairness.clone())),
            Box::new(ShiftFrequencyFamily::new(self.settings.shift_frequency.clone())),
            Box::new(MaxAbsenceFamily::new(self.settings.max_absence.clone())),
            Box::new(SequenceFamily::new(self.settings.sequence.clone())),
            Box::new(ShiftOrderFamily::new(
                self.settings.shift_order_preference.clone(),
            )),
        ]
    }

    /// Builds the model, runs the backend and reconstructs the schedule.
    pub fn solve(&self, options: &SolveOptions) -> Result<SolveResult, SolverError> {
        let span = tracing::info_span!("solve", schedule_id = %self.schedule_id);
        let _guard = span.enter();

        let mut warnings = Vec::new();
        if !options.skip_feasibility_check {
            let report = self.analyze();
            if !report.is_feasible {
                return Ok(SolveResult::infeasible_from_analysis(
                    report.issues,
                    report.warnings,
                ));
            }
            warnings = report.warnings;
        }

        let input = self.input();
        let mut model = Model::new();
        let variables =
            VariableBuilder::new(&self.workers, &self.shift_types, self.periods.len())
                .build(&mut model);

        let mut families = self.families();
        for family in &mut families {
            if family.is_enabled() {
                family.apply(&mut model, &variables, &input)?;
            }
        }

        let mut objective = ObjectiveBuilder::new();
        for family in &families {
            objective.add_family(family.as_ref());
        }
        objective.build(&mut model);
        for (family, total) in objective.total_weight_by_family() {
            tracing::debug!(family, total, "objective family weight");
        }

        let params = SolveParameters {
            time_limit_seconds: options.time_limit_seconds,
            num_search_workers: options.num_search_workers,
            log_output: options.log_solver_output,
        };
        let (status, solution) = model.solve(&params);

        let result = match solution {
            Some(solution) => {
                let schedule = self.reconstruct(&variables, &solution);
                tracing::info!(
                    status = status.name(),
                    objective = solution.objective_value(),
                    assignments = schedule.total_assignments(),
                    "schedule produced"
                );
                SolveResult {
                    success: true,
                    status_name: status.name().to_string(),
                    solve_time_seconds: solution.solve_time_seconds(),
                    objective_value: Some(solution.objective_value()),
                    schedule: Some(schedule),
                    issues: Vec::new(),
                    warnings,
                }
            }
            None => {
                tracing::warn!(status = status.name(), "no schedule produced");
                SolveResult {
                    success: false,
                    status_name: status.name().to_string(),
                    solve_time_seconds: 0.0,
                    objective_value: None,
                    schedule: None,
                    issues: Vec::new(),
                    warnings,
                }
            }
        };
        Ok(result)
    }

    /// Reads the assignment tensor back into schedule value types.
    fn reconstruct(&self, variables: &Variables, solution: &ModelSolution) -> Schedule {
        let mut periods = Vec::with_capacity(self.periods.len());
        let mut statistics: BTreeMap<String, WorkerStatistics> = BTreeMap::new();

        for period in &self.periods {
            let mut assignments: BTreeMap<String, Vec<ShiftInstance>> = BTreeMap::new();
            for worker in &self.workers {
                let mut shifts = Vec::new();
                for shift_type in &self.shift_types {
                    let var = variables.assignment(&worker.id, period.index, &shift_type.id);
                    if solution.bool_value(var) {
                        shifts.push(ShiftInstance {
                            shift_type_id: shift_type.id.clone(),
                            date: period.start_date,
                        });
                        let stats = statistics.entry(worker.id.clone()).or_default();
                        stats.total_shifts += 1;
                        *stats
                            .by_category
                            .entry(shift_type.category.clone())
                            .or_insert(0) += 1;
                    }
                }
                if !shifts.is_empty() {
                    assignments.insert(worker.id.clone(), shifts);
                }
            }
            periods.push(SchedulePeriod {
                period_index: period.index,
                period_start: period.start_date,
                period_end: period.end_date,
                assignments,
            });
        }

        // Workers with no assignments still appear in the statistics.
        for worker in &self.workers {
            statistics.entry(worker.id.clone()).or_default();
        }

        Schedule {
            schedule_id: self.schedule_id.clone(),
            start_date: self.periods.first().map(|p| p.start_date).unwrap_or_default(),
            end_date: self.periods.last().map(|p| p.end_date).unwrap_or_default(),
            periods,
            statistics,
        }
    }
}
