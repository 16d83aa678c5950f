//! Subcommand implementations.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveTime};
use shiftforge_config::{ConfigError, ShiftForgeConfig};
use shiftforge_core::{Period, ShiftType, Worker};
use shiftforge_io::{
    read_schedule_json, write_schedule_json, CsvError, CsvLoader, ExcelError, ExcelExporter,
    Industry, JsonError, SampleError, SampleGenerator,
};
use shiftforge_solver::{ShiftSolver, SolveOptions, SolverError};
use thiserror::Error;

/// Anything a subcommand can fail with; printed as one line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Csv(#[from] CsvError),

    #[error("{0}")]
    Json(#[from] JsonError),

    #[error("{0}")]
    Excel(#[from] ExcelError),

    #[error("{0}")]
    Sample(#[from] SampleError),

    #[error("{0}")]
    Solver(#[from] SolverError),

    #[error("{0}")]
    Usage(String),
}

/// Validates the configuration and prints a summary.
pub fn check_config(path: &Path) -> Result<(), CliError> {
    let config = ShiftForgeConfig::load(path)?;
    config.validate()?;
    println!("Configuration is valid!");
    println!("  Shift types: {}", config.shift_types.len());
    println!("  Solver time limit: {}s", config.solver.max_time_seconds);
    Ok(())
}

/// Inputs of the `generate` subcommand.
pub struct GenerateArgs {
    pub config: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub output: PathBuf,
    pub quick_solve: bool,
    pub time_limit: Option<u64>,
    pub demo: bool,
    pub data_dir: Option<PathBuf>,
    pub verbose: bool,
}

fn demo_shift_types() -> Vec<ShiftType> {
    vec![
        ShiftType {
            id: "day".to_string(),
            name: "Day Shift".to_string(),
            category: "day".to_string(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(15, 0, 0).expect("valid time"),
            duration_hours: 8.0,
            workers_required: 2,
            is_undesirable: false,
            applicable_days: None,
        },
        ShiftType {
            id: "night".to_string(),
            name: "Night Shift".to_string(),
            category: "night".to_string(),
            start_time: NaiveTime::from_hms_opt(23, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(7, 0, 0).expect("valid time"),
            duration_hours: 8.0,
            workers_required: 1,
            is_undesirable: true,
            applicable_days: None,
        },
    ]
}

fn demo_workers() -> Vec<Worker> {
    (1..=10)
        .map(|i| Worker::new(format!("W{i:03}"), format!("Worker {i}")))
        .collect()
}

/// Generates a schedule and writes the JSON document.
pub fn generate(args: GenerateArgs) -> Result<(), CliError> {
    if args.end_date < args.start_date {
        return Err(CliError::Usage(
            "end date must not be before start date".to_string(),
        ));
    }

    println!(
        "Generating schedule from {} to {}",
        args.start_date, args.end_date
    );

    let config = if args.config.exists() {
        let config = ShiftForgeConfig::load(&args.config)?;
        config.validate()?;
        config
    } else {
        ShiftForgeConfig::default()
    };

    let mut solver = if let Some(data_dir) = &args.data_dir {
        let loader = CsvLoader::new();
        let workers = loader.load_workers(data_dir.join("workers.csv"))?;
        let shift_types = loader.load_shift_types(data_dir.join("shift_types.csv"))?;
        println!(
            "Loaded {} workers and {} shift types from {}",
            workers.len(),
            shift_types.len(),
            data_dir.display()
        );
        let periods = Period::weekly(args.start_date, args.end_date);
        let mut solver = ShiftSolver::new(workers, shift_types, periods);

        let availability_path = data_dir.join("availability.csv");
        if availability_path.exists() {
            solver = solver.with_availabilities(loader.load_availability(&availability_path)?);
        }
        let requests_path = data_dir.join("requests.csv");
        if requests_path.exists() {
            solver = solver.with_requests(loader.load_requests(&requests_path)?);
        }
        solver
    } else if args.demo {
        let shift_types = if config.shift_types.is_empty() {
            println!("Using demo shift types (no config file)");
            demo_shift_types()
        } else {
            config.to_shift_types()?
        };
        let workers = demo_workers();
        println!("Using {} demo workers", workers.len());
        let periods = Period::weekly(args.start_date, args.end_date);
        ShiftSolver::new(workers, shift_types, periods)
    } else {
        return Err(CliError::Usage(
            "no worker source: pass --demo or --data-dir <dir>".to_string(),
        ));
    };
    solver = solver.with_settings(config.constraints.clone());

    let time_limit = if let Some(seconds) = args.time_limit {
        seconds
    } else if args.quick_solve {
        config.solver.quick_time_seconds
    } else {
        config.solver.max_time_seconds
    };
    println!("Solving with {time_limit}s time limit...");

    let options = SolveOptions {
        time_limit_seconds: time_limit as f64,
        num_search_workers: config.solver.num_search_workers,
        ..SolveOptions::default()
    };
    let result = solver.solve(&options)?;

    if !result.success {
        println!("No solution found. Status: {}", result.status_name);
        for issue in &result.issues {
            println!("  - {}", issue.message);
        }
        return Err(CliError::Usage("failed to generate schedule".to_string()));
    }

    println!("Solution found! Status: {}", result.status_name);
    println!("Solve time: {:.2}s", result.solve_time_seconds);
    for warning in &result.warnings {
        println!("Warning: {}", warning.message);
    }

    let schedule = result.schedule.as_ref().expect("success implies schedule");
    write_schedule_json(schedule, &args.output)?;
    println!("Schedule written to: {}", args.output.display());

    if args.verbose {
        println!("\nWorker statistics:");
        for (worker_id, stats) in &schedule.statistics {
            println!("  {worker_id}: {} shifts", stats.total_shifts);
        }
    }
    Ok(())
}

/// Writes sample input files.
pub fn generate_samples(
    output_dir: &Path,
    industry: &str,
    workers: usize,
    weeks: usize,
    seed: u64,
    start_date: Option<NaiveDate>,
) -> Result<(), CliError> {
    let industry: Industry = industry.parse()?;
    let start_date = start_date.unwrap_or_else(next_monday);

    let files = SampleGenerator::new(seed).generate(output_dir, industry, workers, weeks, start_date)?;
    println!("Sample data written to {}:", output_dir.display());
    for path in [
        &files.workers,
        &files.shift_types,
        &files.availability,
        &files.requests,
    ] {
        println!("  {}", path.display());
    }
    Ok(())
}

fn next_monday() -> NaiveDate {
    let today = chrono::Local::now().date_naive();
    let days_ahead = match (7 - today.weekday().num_days_from_monday()) % 7 {
        0 => 7,
        days => days,
    };
    today + chrono::Duration::days(i64::from(days_ahead))
}

/// Loads the given files and reports record counts.
pub fn import_data(
    workers: &Path,
    shift_types: Option<&Path>,
    availability: Option<&Path>,
    requests: Option<&Path>,
) -> Result<(), CliError> {
    let loader = CsvLoader::new();

    let loaded_workers = loader.load_workers(workers)?;
    println!("Workers: {}", loaded_workers.len());

    if let Some(path) = shift_types {
        println!("Shift types: {}", loader.load_shift_types(path)?.len());
    }
    if let Some(path) = availability {
        println!("Availability records: {}", loader.load_availability(path)?.len());
    }
    if let Some(path) = requests {
        println!("Requests: {}", loader.load_requests(path)?.len());
    }
    println!("All files are valid.");
    Ok(())
}

/// Renders a JSON schedule as the three-sheet workbook.
pub fn export(schedule_path: &Path, output: &Path) -> Result<(), CliError> {
    let schedule = read_schedule_json(schedule_path)?;
    ExcelExporter::new().export(&schedule, output)?;
    println!(
        "Exported {} periods to {}",
        schedule.periods.len(),
        output.display()
    );
    Ok(())
}
