//! CSV loaders for the four tabular inputs.
//!
//! Headers match case-insensitively. Malformed rows fail with a single
//! error naming the column and the 1-based line; nothing partial is ever
//! returned.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use shiftforge_core::{
    Availability, AvailabilityType, RequestType, SchedulingRequest, ShiftType, Worker,
};
use thiserror::Error;

/// Date formats accepted by the loaders, in precedence order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Loader errors, each one actionable on its own.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("line {line}: column '{column}': {message}")]
    InvalidValue {
        line: u64,
        column: String,
        message: String,
    },
}

/// Case-insensitive header index for one file.
struct HeaderMap {
    index: HashMap<String, usize>,
}

impl HeaderMap {
    fn new(headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
            .collect();
        HeaderMap { index }
    }

    fn get(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    fn require(&self, column: &str) -> Result<usize, CsvError> {
        self.get(column).ok_or_else(|| CsvError::MissingColumn {
            column: column.to_string(),
        })
    }
}

/// One record plus the context needed for precise errors.
struct Row<'a> {
    record: &'a csv::StringRecord,
    line: u64,
}

impl<'a> Row<'a> {
    fn field(&self, idx: usize) -> &'a str {
        self.record.get(idx).unwrap_or("").trim()
    }

    fn opt_field(&self, idx: Option<usize>) -> Option<&'a str> {
        idx.map(|i| self.field(i)).filter(|v| !v.is_empty())
    }

    fn invalid(&self, column: &str, message: impl Into<String>) -> CsvError {
        CsvError::InvalidValue {
            line: self.line,
            column: column.to_string(),
            message: message.into(),
        }
    }

    fn required(&self, idx: usize, column: &str) -> Result<&'a str, CsvError> {
        let value = self.field(idx);
        if value.is_empty() {
            Err(self.invalid(column, "value must not be empty"))
        } else {
            Ok(value)
        }
    }

    fn date(&self, idx: usize, column: &str) -> Result<NaiveDate, CsvError> {
        let value = self.required(idx, column)?;
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Ok(date);
            }
        }
        Err(self.invalid(
            column,
            format!("'{value}' is not a date (expected YYYY-MM-DD, MM/DD/YYYY or DD/MM/YYYY)"),
        ))
    }

    fn time(&self, idx: usize, column: &str) -> Result<NaiveTime, CsvError> {
        let value = self.required(idx, column)?;
        NaiveTime::parse_from_str(value, "%H:%M")
            .map_err(|_| self.invalid(column, format!("'{value}' is not HH:MM")))
    }

    fn bool_flag(&self, idx: usize, column: &str) -> Result<Option<bool>, CsvError> {
        let value = self.field(idx);
        if value.is_empty() {
            return Ok(None);
        }
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(self.invalid(
                column,
                format!("'{other}' is not a boolean (expected true/false, yes/no or 1/0)"),
            )),
        }
    }

    fn comma_list(&self, idx: Option<usize>) -> Vec<String> {
        self.opt_field(idx)
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Reads the domain records out of CSV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

impl CsvLoader {
    /// Creates a loader.
    pub fn new() -> Self {
        CsvLoader
    }

    /// Reads the whole file: the header index plus each record with its
    /// 1-based line number.
    fn read(&self, path: &Path) -> Result<(HeaderMap, Vec<(u64, csv::StringRecord)>), CsvError> {
        if !path.exists() {
            return Err(CsvError::FileNotFound(path.to_path_buf()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let headers = HeaderMap::new(reader.headers()?);
        let mut records = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 2);
            records.push((line, record));
        }
        tracing::debug!(path = %path.display(), rows = records.len(), "csv read");
        Ok((headers, records))
    }

    /// Loads workers. Required columns: `id`, `name`.
    pub fn load_workers(&self, path: impl AsRef<Path>) -> Result<Vec<Worker>, CsvError> {
        let (headers, records) = self.read(path.as_ref())?;
        let id_idx = headers.require("id")?;
        let name_idx = headers.require("name")?;
        let type_idx = headers.get("worker_type");
        let restricted_idx = headers.get("restricted_shifts");
        let preferred_idx = headers.get("preferred_shifts");

        let mut workers = Vec::with_capacity(records.len());
        for (line, record) in &records {
            let row = Row { record, line: *line };
            let mut worker =
                Worker::new(row.required(id_idx, "id")?, row.required(name_idx, "name")?);
            worker.worker_type = row.opt_field(type_idx).map(str::to_string);
            worker.restricted_shifts = row.comma_list(restricted_idx).into_iter().collect();
            worker.preferred_shifts = row.comma_list(preferred_idx).into_iter().collect();
            workers.push(worker);
        }
        Ok(workers)
    }

    /// Loads shift types. Required columns: `id`, `name`, `category`,
    /// `start_time`, `end_time`, `duration_hours`, `workers_required`,
    /// `is_undesirable`.
    pub fn load_shift_types(&self, path: impl AsRef<Path>) -> Result<Vec<ShiftType>, CsvError> {
        let (headers, records) = self.read(path.as_ref())?;
        let id_idx = headers.require("id")?;
        let name_idx = headers.require("name")?;
        let category_idx = headers.require("category")?;
        let start_idx = headers.require("start_time")?;
        let end_idx = headers.require("end_time")?;
        let duration_idx = headers.require("duration_hours")?;
        let required_idx = headers.require("workers_required")?;
        let undesirable_idx = headers.require("is_undesirable")?;

        let mut shift_types = Vec::with_capacity(records.len());
        for (line, record) in &records {
            let row = Row { record, line: *line };
            let duration: f64 = {
                let value = row.required(duration_idx, "duration_hours")?;
                value.parse().map_err(|_| {
                    row.invalid("duration_hours", format!("'{value}' is not a number"))
                })?
            };
            let workers_required: u32 = {
                let value = row.required(required_idx, "workers_required")?;
                value.parse().map_err(|_| {
                    row.invalid(
                        "workers_required",
                        format!("'{value}' is not a non-negative integer"),
                    )
                })?
            };
            shift_types.push(ShiftType {
                id: row.required(id_idx, "id")?.to_string(),
                name: row.required(name_idx, "name")?.to_string(),
                category: row.required(category_idx, "category")?.to_string(),
                start_time: row.time(start_idx, "start_time")?,
                end_time: row.time(end_idx, "end_time")?,
                duration_hours: duration,
                workers_required,
                is_undesirable: row
                    .bool_flag(undesirable_idx, "is_undesirable")?
                    .unwrap_or(false),
                applicable_days: None,
            });
        }
        Ok(shift_types)
    }

    /// Loads availability records. Required columns: `worker_id`,
    /// `start_date`, `end_date`, `availability_type`.
    pub fn load_availability(&self, path: impl AsRef<Path>) -> Result<Vec<Availability>, CsvError> {
        let (headers, records) = self.read(path.as_ref())?;
        let worker_idx = headers.require("worker_id")?;
        let start_idx = headers.require("start_date")?;
        let end_idx = headers.require("end_date")?;
        let type_idx = headers.require("availability_type")?;
        let shift_idx = headers.get("shift_type_id");

        let mut availabilities = Vec::with_capacity(records.len());
        for (line, record) in &records {
            let row = Row { record, line: *line };
            let availability_type = {
                let value = row.required(type_idx, "availability_type")?;
                AvailabilityType::from_str(value)
                    .map_err(|e| row.invalid("availability_type", e.to_string()))?
            };
            availabilities.push(Availability {
                worker_id: row.required(worker_idx, "worker_id")?.to_string(),
                start_date: row.date(start_idx, "start_date")?,
                end_date: row.date(end_idx, "end_date")?,
                availability_type,
                shift_type_id: row.opt_field(shift_idx).map(str::to_string),
            });
        }
        Ok(availabilities)
    }

    /// Loads requests. Required columns: `worker_id`, `start_date`,
    /// `end_date`, `request_type`, `shift_type_id`; optional `priority`
    /// (default 1) and `is_hard` (empty inherits the family setting).
    pub fn load_requests(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<SchedulingRequest>, CsvError> {
        let (headers, records) = self.read(path.as_ref())?;
        let worker_idx = headers.require("worker_id")?;
        let start_idx = headers.require("start_date")?;
        let end_idx = headers.require("end_date")?;
        let type_idx = headers.require("request_type")?;
        let shift_idx = headers.require("shift_type_id")?;
        let priority_idx = headers.get("priority");
        let hard_idx = headers.get("is_hard");

        let mut requests = Vec::with_capacity(records.len());
        for (line, record) in &records {
            let row = Row { record, line: *line };
            let request_type = {
                let value = row.required(type_idx, "request_type")?;
                RequestType::from_str(value)
                    .map_err(|e| row.invalid("request_type", e.to_string()))?
            };
            let priority = match row.opt_field(priority_idx) {
                None => 1,
                Some(value) => {
                    let parsed: i64 = value.parse().map_err(|_| {
                        row.invalid("priority", format!("'{value}' is not an integer"))
                    })?;
                    if parsed < 1 {
                        return Err(row.invalid("priority", "priority must be at least 1"));
                    }
                    parsed
                }
            };
            let is_hard = match hard_idx {
                Some(idx) => row.bool_flag(idx, "is_hard")?,
                None => None,
            };
            requests.push(SchedulingRequest {
                worker_id: row.required(worker_idx, "worker_id")?.to_string(),
                start_date: row.date(start_idx, "start_date")?,
                end_date: row.date(end_idx, "end_date")?,
                request_type,
                shift_type_id: row.required(shift_idx, "shift_type_id")?.to_string(),
                priority,
                is_hard,
            });
        }
        Ok(requests)
    }
}
