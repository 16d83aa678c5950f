//! Configuration system for shiftforge.
//!
//! Load shift types, constraint settings and solver settings from TOML or
//! YAML files to control a solve without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use shiftforge_config::ShiftForgeConfig;
//!
//! let config = ShiftForgeConfig::from_toml_str(r#"
//!     [solver]
//!     max_time_seconds = 120
//!
//!     [[shift_types]]
//!     id = "night"
//!     name = "Night Shift"
//!     category = "night"
//!     start_time = "23:00"
//!     end_time = "07:00"
//!     duration_hours = 8.0
//!     workers_required = 1
//!     is_undesirable = true
//!
//!     [constraints.fairness]
//!     enabled = true
//!     is_hard = false
//!     weight = 500
//! "#).unwrap();
//!
//! assert_eq!(config.solver.max_time_seconds, 120);
//! assert_eq!(config.shift_types.len(), 1);
//! ```
//!
//! Use the defaults when the file is missing:
//!
//! ```
//! use shiftforge_config::ShiftForgeConfig;
//!
//! let config = ShiftForgeConfig::load("config.toml").unwrap_or_default();
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use shiftforge_constraints::ConstraintSettings;
use shiftforge_core::ShiftType;
use thiserror::Error;


/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for the scheduling engine.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ShiftForgeConfig {
    /// Declarative shift-type catalog.
    #[serde(default)]
    pub shift_types: Vec<ShiftTypeConfig>,

    /// Per-family constraint settings.
    #[serde(default)]
    pub constraints: ConstraintSettings,

    /// Backend settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

impl ShiftForgeConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration, picking the parser from the file extension
    /// (`.toml`, `.yaml`/`.yml`; anything else is tried as TOML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks the configuration for internal consistency.
    ///
    /// Used by `check-config`; a passing configuration converts cleanly to
    /// domain records.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for st in &self.shift_types {
            if !seen.insert(st.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate shift type id '{}'",
                    st.id
                )));
            }
            st.parse_times()?;
            if st.duration_hours <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "shift type '{}': duration_hours must be positive",
                    st.id
                )));
            }
            if let Some(days) = &st.applicable_days {
                if days.iter().any(|d| *d > 6) {
                    return Err(ConfigError::Invalid(format!(
                        "shift type '{}': applicable_days must be 0..=6 (Monday = 0)",
                        st.id
                    )));
                }
            }
        }

        for (name, config) in [
            ("coverage", &self.constraints.coverage),
            ("restriction", &self.constraints.restriction),
            ("availability", &self.constraints.availability),
            ("request", &self.constraints.request),
            ("fairness", &self.constraints.fairness),
            ("shift_frequency", &self.constraints.shift_frequency),
            ("max_absence", &self.constraints.max_absence),
            ("sequence", &self.constraints.sequence),
            ("shift_order_preference", &self.constraints.shift_order_preference),
        ] {
            if config.weight < 0 {
                return Err(ConfigError::Invalid(format!(
                    "constraint '{name}': weight must be non-negative"
                )));
            }
        }
        Ok(())
    }

    /// Converts the shift-type catalog to domain records.
    pub fn to_shift_types(&self) -> Result<Vec<ShiftType>, ConfigError> {
        self.shift_types.iter().map(|st| st.to_shift_type()).collect()
    }
}

/// One shift type as written in a configuration file.
///
/// Times are `HH:MM` strings in the file; [`to_shift_type`](Self::to_shift_type)
/// parses them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ShiftTypeConfig {
    pub id: String,
    pub name: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
    pub workers_required: u32,
    #[serde(default)]
    pub is_undesirable: bool,
    #[serde(default)]
    pub applicable_days: Option<Vec<u8>>,
}

impl ShiftTypeConfig {
    fn parse_times(&self) -> Result<(NaiveTime, NaiveTime), ConfigError> {
        let parse = |label: &str, value: &str| {
            NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
                ConfigError::Invalid(format!(
                    "shift type '{}': {label} '{value}' is not HH:MM",
                    self.id
                ))
            })
        };
        Ok((
            parse("start_time", &self.start_time)?,
            parse("end_time", &self.end_time)?,
        ))
    }

    /// Converts to the domain record, parsing the times.
    pub fn to_shift_type(&self) -> Result<ShiftType, ConfigError> {
        let (start_time, end_time) = self.parse_times()?;
        Ok(ShiftType {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            start_time,
            end_time,
            duration_hours: self.duration_hours,
            workers_required: self.workers_required,
            is_undesirable: self.is_undesirable,
            applicable_days: self
                .applicable_days
                .as_ref()
                .map(|days| days.iter().copied().collect()),
        })
    }
}

/// Backend settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverSettings {
    /// Default time limit for `generate`.
    #[serde(default = "default_max_time")]
    pub max_time_seconds: u64,

    /// Time limit used by quick-solve mode.
    #[serde(default = "default_quick_time")]
    pub quick_time_seconds: u64,

    /// Parallel-search hint passed to the backend.
    #[serde(default)]
    pub num_search_workers: Option<u32>,
}

fn default_max_time() -> u64 {
    300
}

fn default_quick_time() -> u64 {
    60
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            max_time_seconds: default_max_time(),
            quick_time_seconds: default_quick_time(),
            num_search_workers: None,
        }
    }
}
