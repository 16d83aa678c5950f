//! The JSON schedule document.
//!
//! The document is the serde shape of [`Schedule`]; writing and re-reading
//! it is lossless, and re-exporting a re-import reproduces the bytes.

use std::path::Path;

use shiftforge_core::Schedule;
use thiserror::Error;

/// JSON export/import errors.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders the schedule document as a pretty-printed string.
pub fn schedule_to_json_string(schedule: &Schedule) -> Result<String, JsonError> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

/// Writes the schedule document, creating parent directories as needed.
pub fn write_schedule_json(schedule: &Schedule, path: impl AsRef<Path>) -> Result<(), JsonError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, schedule_to_json_string(schedule)?)?;
    tracing::info!(path = %path.display(), "schedule written");
    Ok(())
}

/// Reads a schedule document back.
pub fn read_schedule_json(path: impl AsRef<Path>) -> Result<Schedule, JsonError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
