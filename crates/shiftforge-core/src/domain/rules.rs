//! Frequency and ordering rules.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Requires a worker to appear regularly in a set of shift types.
///
/// Within every sliding window of `max_periods_between + 1` periods the
/// worker should hold at least one shift from the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFrequencyRequirement {
    /// Worker the requirement applies to.
    pub worker_id: String,
    /// Shift types that satisfy the requirement.
    pub shift_types: BTreeSet<String>,
    /// Maximum number of consecutive periods without one of the shifts.
    pub max_periods_between: usize,
}

/// What fires a shift-order rule in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OrderTrigger {
    /// The worker holds this specific shift type.
    ShiftType(String),
    /// The worker holds any shift in this category.
    Category(String),
    /// The worker has an `unavailable` record covering the period.
    Unavailability,
}

impl OrderTrigger {
    /// Parses the `(trigger_type, trigger_value)` pair used by loaders.
    pub fn parse(trigger_type: &str, value: Option<&str>) -> Result<Self, DomainError> {
        match trigger_type.to_ascii_lowercase().as_str() {
            "shift_type" => value
                .map(|v| OrderTrigger::ShiftType(v.to_string()))
                .ok_or(DomainError::MissingOrderValue("trigger")),
            "category" => value
                .map(|v| OrderTrigger::Category(v.to_string()))
                .ok_or(DomainError::MissingOrderValue("trigger")),
            "unavailability" => Ok(OrderTrigger::Unavailability),
            other => Err(DomainError::UnknownTriggerType(other.to_string())),
        }
    }
}

/// What a shift-order rule asks for in the adjacent period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OrderTarget {
    /// A specific shift type.
    ShiftType(String),
    /// Any shift in a category.
    Category(String),
}

impl OrderTarget {
    /// Parses the `(preferred_type, preferred_value)` pair used by loaders.
    pub fn parse(preferred_type: &str, value: Option<&str>) -> Result<Self, DomainError> {
        let value = value.ok_or(DomainError::MissingOrderValue("preferred"))?;
        match preferred_type.to_ascii_lowercase().as_str() {
            "shift_type" => Ok(OrderTarget::ShiftType(value.to_string())),
            "category" => Ok(OrderTarget::Category(value.to_string())),
            other => Err(DomainError::UnknownPreferredType(other.to_string())),
        }
    }
}

/// Whether the preferred shift goes before or after the trigger period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    /// Preferred at period `N`, trigger at `N + 1`.
    Before,
    /// Trigger at period `N`, preferred at `N + 1`.
    After,
}

impl FromStr for OrderDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(OrderDirection::Before),
            "after" => Ok(OrderDirection::After),
            other => Err(DomainError::UnknownDirection(other.to_string())),
        }
    }
}

/// "When the trigger occurs in period N, the preferred shift should occur in
/// the adjacent period", scoped to `worker_ids` when set and to all workers
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOrderPreference {
    /// Identifier used in diagnostics and violation labels.
    pub rule_id: String,
    /// What fires the rule.
    pub trigger: OrderTrigger,
    /// Side of the trigger the preferred shift belongs on.
    pub direction: OrderDirection,
    /// What should occur next to the trigger.
    pub preferred: OrderTarget,
    /// Weight multiplier, at least 1.
    pub priority: i64,
    /// Workers in scope; `None` = every worker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_ids: Option<BTreeSet<String>>,
}

impl ShiftOrderPreference {
    /// Returns true if the rule applies to the worker.
    pub fn applies_to(&self, worker_id: &str) -> bool {
        match &self.worker_ids {
            None => true,
            Some(ids) => ids.contains(worker_id),
        }
    }
}
