//! The `shiftforge` command-line interface.
//!
//! A thin collaborator over the library crates: it parses arguments, wires
//! files to the solver and prints one-line errors with exit code 1. All
//! scheduling logic lives in the library.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::CliError;

#[derive(Parser)]
#[command(name = "shiftforge", version, about = "Shift scheduling optimization")]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true, default_value = "config/shiftforge.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show version information.
    Version,

    /// Validate a configuration file.
    CheckConfig,

    /// Generate an optimized schedule for a date range.
    Generate {
        /// Schedule start date (YYYY-MM-DD).
        #[arg(long)]
        start_date: chrono::NaiveDate,

        /// Schedule end date (YYYY-MM-DD).
        #[arg(long)]
        end_date: chrono::NaiveDate,

        /// Output file path for the JSON schedule.
        #[arg(short, long)]
        output: PathBuf,

        /// Use the quick-solve time limit.
        #[arg(long, conflicts_with = "time_limit")]
        quick_solve: bool,

        /// Custom time limit in seconds.
        #[arg(long)]
        time_limit: Option<u64>,

        /// Use built-in demo data instead of input files.
        #[arg(long, conflicts_with = "data_dir")]
        demo: bool,

        /// Directory holding workers.csv, shift_types.csv, availability.csv
        /// and requests.csv (as written by generate-samples).
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Generate sample input files.
    GenerateSamples {
        /// Output directory for the sample files.
        #[arg(long, default_value = "./data/samples")]
        output_dir: PathBuf,

        /// Industry template: healthcare, retail or logistics.
        #[arg(long, default_value = "healthcare")]
        industry: String,

        /// Number of workers to generate.
        #[arg(long, default_value_t = 12)]
        workers: usize,

        /// Number of weekly periods the data covers.
        #[arg(long, default_value_t = 4)]
        weeks: usize,

        /// Random seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First date of the horizon (YYYY-MM-DD; default: next Monday).
        #[arg(long)]
        start_date: Option<chrono::NaiveDate>,
    },

    /// Validate tabular input files and report record counts.
    ImportData {
        /// Workers CSV file.
        #[arg(long)]
        workers: PathBuf,

        /// Shift types CSV file.
        #[arg(long)]
        shift_types: Option<PathBuf>,

        /// Availability CSV file.
        #[arg(long)]
        availability: Option<PathBuf>,

        /// Requests CSV file.
        #[arg(long)]
        requests: Option<PathBuf>,
    },

    /// Render a JSON schedule as an Excel workbook.
    Export {
        /// Input schedule JSON.
        #[arg(long)]
        schedule: PathBuf,

        /// Output .xlsx path.
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Version => {
            println!("shiftforge v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::CheckConfig => commands::check_config(&cli.config),
        Command::Generate {
            start_date,
            end_date,
            output,
            quick_solve,
            time_limit,
            demo,
            data_dir,
        } => commands::generate(commands::GenerateArgs {
            config: cli.config,
            start_date,
            end_date,
            output,
            quick_solve,
            time_limit,
            demo,
            data_dir,
            verbose: cli.verbose > 0,
        }),
        Command::GenerateSamples {
            output_dir,
            industry,
            workers,
            weeks,
            seed,
            start_date,
        } => commands::generate_samples(&output_dir, &industry, workers, weeks, seed, start_date),
        Command::ImportData {
            workers,
            shift_types,
            availability,
            requests,
        } => commands::import_data(
            &workers,
            shift_types.as_deref(),
            availability.as_deref(),
            requests.as_deref(),
        ),
        Command::Export { schedule, output } => commands::export(&schedule, &output),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(error) = run(cli) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
