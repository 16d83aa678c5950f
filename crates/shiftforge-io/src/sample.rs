//! Sample-data generation for demos and smoke tests.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Sample generation errors.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown industry: '{0}' (expected healthcare, retail or logistics)")]
    UnknownIndustry(String),
}

/// Shift-type template the generator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    Healthcare,
    Retail,
    Logistics,
}

impl FromStr for Industry {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "healthcare" => Ok(Industry::Healthcare),
            "retail" => Ok(Industry::Retail),
            "logistics" => Ok(Industry::Logistics),
            other => Err(SampleError::UnknownIndustry(other.to_string())),
        }
    }
}

impl Industry {
    /// Rows for `shift_types.csv`:
    /// (id, name, category, start, end, hours, required, undesirable).
    fn shift_rows(&self) -> &'static [(&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str)] {
        match self {
            Industry::Healthcare => &[
                ("day", "Day Shift", "day", "07:00", "15:00", "8.0", "2", "false"),
                ("evening", "Evening Shift", "evening", "15:00", "23:00", "8.0", "2", "false"),
                ("night", "Night Shift", "night", "23:00", "07:00", "8.0", "1", "true"),
                ("weekend", "Weekend Shift", "weekend", "07:00", "19:00", "12.0", "1", "true"),
            ],
            Industry::Retail => &[
                ("opening", "Opening Shift", "day", "06:00", "14:00", "8.0", "2", "false"),
                ("closing", "Closing Shift", "evening", "14:00", "22:00", "8.0", "2", "true"),
                ("weekend", "Weekend Shift", "weekend", "09:00", "18:00", "9.0", "2", "true"),
            ],
            Industry::Logistics => &[
                ("early", "Early Shift", "day", "05:00", "13:00", "8.0", "3", "false"),
                ("late", "Late Shift", "evening", "13:00", "21:00", "8.0", "2", "false"),
                ("night", "Night Shift", "night", "21:00", "05:00", "8.0", "1", "true"),
            ],
        }
    }
}

/// Paths of the four generated files.
#[derive(Debug, Clone)]
pub struct SampleFiles {
    pub workers: PathBuf,
    pub shift_types: PathBuf,
    pub availability: PathBuf,
    pub requests: PathBuf,
}

/// Deterministic generator for consistent demo datasets.
///
/// The same seed, counts and start date produce the same files, so demos
/// and tests can rely on their content.
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    /// Creates a generator seeded for reproducibility.
    pub fn new(seed: u64) -> Self {
        SampleGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Writes the four sample files into `output_dir`.
    pub fn generate(
        &mut self,
        output_dir: impl AsRef<Path>,
        industry: Industry,
        num_workers: usize,
        num_weeks: usize,
        start_date: NaiveDate,
    ) -> Result<SampleFiles, SampleError> {
        let dir = output_dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let shift_rows = industry.shift_rows();
        let files = SampleFiles {
            workers: dir.join("workers.csv"),
            shift_types: dir.join("shift_types.csv"),
            availability: dir.join("availability.csv"),
            requests: dir.join("requests.csv"),
        };

        self.write_shift_types(&files.shift_types, shift_rows)?;
        let worker_ids = self.write_workers(&files.workers, num_workers, shift_rows)?;
        let end_date = start_date + Duration::weeks(num_weeks as i64) - Duration::days(1);
        self.write_availability(&files.availability, &worker_ids, start_date, end_date)?;
        self.write_requests(&files.requests, &worker_ids, shift_rows, start_date, num_weeks)?;

        tracing::info!(
            dir = %dir.display(),
            workers = num_workers,
            weeks = num_weeks,
            "sample data generated"
        );
        Ok(files)
    }

    fn write_shift_types(
        &mut self,
        path: &Path,
        rows: &[(&str, &str, &str, &str, &str, &str, &str, &str)],
    ) -> Result<(), SampleError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "id",
            "name",
            "category",
            "start_time",
            "end_time",
            "duration_hours",
            "workers_required",
            "is_undesirable",
        ])?;
        for row in rows {
            writer.write_record([row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_workers(
        &mut self,
        path: &Path,
        count: usize,
        shift_rows: &[(&str, &str, &str, &str, &str, &str, &str, &str)],
    ) -> Result<Vec<String>, SampleError> {
        const FIRST_NAMES: [&str; 10] = [
            "Alice", "Bob", "Carmen", "Dmitri", "Elena", "Farid", "Grace", "Hana", "Ivan", "Jo",
        ];
        const LAST_NAMES: [&str; 10] = [
            "Smith", "Jones", "Garcia", "Chen", "Okafor", "Novak", "Silva", "Kim", "Moreau",
            "Patel",
        ];

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["id", "name", "worker_type", "restricted_shifts"])?;

        let mut ids = Vec::with_capacity(count);
        for i in 1..=count {
            let id = format!("W{i:03}");
            let name = format!(
                "{} {}",
                FIRST_NAMES[self.rng.random_range(0..FIRST_NAMES.len())],
                LAST_NAMES[self.rng.random_range(0..LAST_NAMES.len())]
            );
            let worker_type = if self.rng.random_bool(0.75) {
                "full_time"
            } else {
                "part_time"
            };
            // Roughly one in five workers cannot take the undesirable shift.
            let restricted = if self.rng.random_bool(0.2) {
                shift_rows
                    .iter()
                    .find(|r| r.7 == "true")
                    .map(|r| r.0)
                    .unwrap_or("")
            } else {
                ""
            };
            writer.write_record([id.as_str(), name.as_str(), worker_type, restricted])?;
            ids.push(id);
        }
        writer.flush()?;
        Ok(ids)
    }

    fn write_availability(
        &mut self,
        path: &Path,
        worker_ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(), SampleError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "worker_id",
            "start_date",
            "end_date",
            "availability_type",
            "shift_type_id",
        ])?;

        let horizon_days = (end_date - start_date).num_days().max(1);
        for worker_id in worker_ids {
            // About a third of the workers take one stretch of leave.
            if !self.rng.random_bool(0.35) {
                continue;
            }
            let offset = self.rng.random_range(0..horizon_days);
            let length = self.rng.random_range(1..=7);
            let leave_start = start_date + Duration::days(offset);
            let leave_end = (leave_start + Duration::days(length)).min(end_date);
            writer.write_record([
                worker_id.as_str(),
                &leave_start.to_string(),
                &leave_end.to_string(),
                "unavailable",
                "",
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_requests(
        &mut self,
        path: &Path,
        worker_ids: &[String],
        shift_rows: &[(&str, &str, &str, &str, &str, &str, &str, &str)],
        start_date: NaiveDate,
        num_weeks: usize,
    ) -> Result<(), SampleError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "worker_id",
            "start_date",
            "end_date",
            "request_type",
            "shift_type_id",
            "priority",
            "is_hard",
        ])?;

        for worker_id in worker_ids {
            if !self.rng.random_bool(0.5) {
                continue;
            }
            let week = self.rng.random_range(0..num_weeks.max(1));
            let week_start = start_date + Duration::weeks(week as i64);
            let week_end = week_start + Duration::days(6);
            let shift = shift_rows[self.rng.random_range(0..shift_rows.len())].0;
            let request_type = if self.rng.random_bool(0.5) {
                "positive"
            } else {
                "negative"
            };
            let priority = self.rng.random_range(1..=3).to_string();
            let is_hard = if self.rng.random_bool(0.1) { "true" } else { "" };
            writer.write_record([
                worker_id.as_str(),
                &week_start.to_string(),
                &week_end.to_string(),
                request_type,
                shift,
                priority.as_str(),
                is_hard,
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::csv_loader::CsvLoader;

    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn generated_files_load_back_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let files = SampleGenerator::new(42)
            .generate(dir.path(), Industry::Healthcare, 12, 4, start())
            .unwrap();

        let loader = CsvLoader::new();
        let workers = loader.load_workers(&files.workers).unwrap();
        let shift_types = loader.load_shift_types(&files.shift_types).unwrap();
        let availability = loader.load_availability(&files.availability).unwrap();
        let requests = loader.load_requests(&files.requests).unwrap();

        assert_eq!(workers.len(), 12);
        assert_eq!(shift_types.len(), 4);
        for avail in &availability {
            assert!(avail.end_date >= avail.start_date);
        }
        for request in &requests {
            assert!(request.priority >= 1);
        }
    }

    #[test]
    fn same_seed_reproduces_identical_files() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        SampleGenerator::new(7)
            .generate(dir_a.path(), Industry::Retail, 8, 3, start())
            .unwrap();
        SampleGenerator::new(7)
            .generate(dir_b.path(), Industry::Retail, 8, 3, start())
            .unwrap();

        for name in ["workers.csv", "shift_types.csv", "availability.csv", "requests.csv"] {
            let a = std::fs::read(dir_a.path().join(name)).unwrap();
            let b = std::fs::read(dir_b.path().join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between runs");
        }
    }

    #[test]
    fn industry_parsing() {
        assert_eq!("Healthcare".parse::<Industry>().unwrap(), Industry::Healthcare);
        assert!("finance".parse::<Industry>().is_err());
    }
}
