//! Workers that can be assigned to shifts.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A worker who can be assigned to shift instances.
///
/// # Example
///
/// ```
/// use shiftforge_core::Worker;
///
/// let w = Worker::new("W001", "Alice Smith")
///     .with_worker_type("full_time")
///     .with_restricted_shift("night");
/// assert!(!w.can_work_shift("night"));
/// assert!(w.can_work_shift("day"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional classification (e.g. `full_time`, `per_diem`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_type: Option<String>,
    /// Shift-type ids this worker must never be assigned.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub restricted_shifts: BTreeSet<String>,
    /// Shift-type ids this worker prefers.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub preferred_shifts: BTreeSet<String>,
    /// Free-form attributes carried from the input files.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Worker {
    /// Creates a worker with no restrictions or preferences.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Worker {
            id: id.into(),
            name: name.into(),
            worker_type: None,
            restricted_shifts: BTreeSet::new(),
            preferred_shifts: BTreeSet::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the worker type.
    pub fn with_worker_type(mut self, worker_type: impl Into<String>) -> Self {
        self.worker_type = Some(worker_type.into());
        self
    }

    /// Adds a restricted shift-type id.
    pub fn with_restricted_shift(mut self, shift_type_id: impl Into<String>) -> Self {
        self.restricted_shifts.insert(shift_type_id.into());
        self
    }

    /// Adds a preferred shift-type id.
    pub fn with_preferred_shift(mut self, shift_type_id: impl Into<String>) -> Self {
        self.preferred_shifts.insert(shift_type_id.into());
        self
    }

    /// Returns true unless the shift type is restricted for this worker.
    pub fn can_work_shift(&self, shift_type_id: &str) -> bool {
        !self.restricted_shifts.contains(shift_type_id)
    }
}
