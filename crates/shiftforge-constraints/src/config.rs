//! Per-family constraint configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A free-form parameter value.
///
/// Parameters come from TOML or YAML files, so only the scalar shapes those
/// formats produce are represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean parameter.
    Bool(bool),
    /// Integer parameter.
    Int(i64),
    /// Floating-point parameter.
    Float(f64),
    /// String parameter.
    Str(String),
    /// List-of-strings parameter (shift-type or category subsets).
    List(Vec<String>),
}

/// Free-form parameter map attached to a family configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, ParamValue>);

impl Parameters {
    /// The empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns true if the parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Integer parameter, if present and integral.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(ParamValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Integer parameter narrowed to usize; negative values read as absent.
    pub fn get_usize(&self, name: &str) -> Option<usize> {
        self.get_i64(name).and_then(|v| usize::try_from(v).ok())
    }

    /// Boolean parameter, if present.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(ParamValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// String parameter, if present.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ParamValue::Str(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// List parameter, if present.
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name) {
            Some(ParamValue::List(v)) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// Configuration selecting and shaping one constraint family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    /// Whether the family runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Hard families assert; soft families emit weighted violations.
    #[serde(default = "default_true")]
    pub is_hard: bool,
    /// Family-level weight applied to every violation term.
    #[serde(default = "default_weight")]
    pub weight: i64,
    /// Family-specific parameters.
    #[serde(default)]
    pub parameters: Parameters,
}

fn default_true() -> bool {
    true
}

fn default_weight() -> i64 {
    100
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        ConstraintConfig {
            enabled: true,
            is_hard: true,
            weight: 100,
            parameters: Parameters::new(),
        }
    }
}

impl ConstraintConfig {
    /// A hard configuration with the default weight.
    pub fn hard() -> Self {
        Self::default()
    }

    /// A soft configuration with the given weight.
    pub fn soft(weight: i64) -> Self {
        ConstraintConfig {
            enabled: true,
            is_hard: false,
            weight,
            parameters: Parameters::new(),
        }
    }

    /// A disabled configuration.
    pub fn disabled() -> Self {
        ConstraintConfig {
            enabled: false,
            ..Self::default()
        }
    }

    /// Adds a parameter, builder style.
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.set(name, value);
        self
    }
}

/// The full set of family configurations for one solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSettings {
    pub coverage: ConstraintConfig,
    pub restriction: ConstraintConfig,
    pub availability: ConstraintConfig,
    pub request: ConstraintConfig,
    pub fairness: ConstraintConfig,
    pub shift_frequency: ConstraintConfig,
    pub max_absence: ConstraintConfig,
    pub sequence: ConstraintConfig,
    pub shift_order_preference: ConstraintConfig,
}

impl Default for ConstraintSettings {
    fn default() -> Self {
        ConstraintSettings {
            coverage: ConstraintConfig::hard(),
            restriction: ConstraintConfig::hard(),
            availability: ConstraintConfig::hard(),
            request: ConstraintConfig::soft(150),
            fairness: ConstraintConfig::soft(500),
            shift_frequency: ConstraintConfig::soft(500),
            max_absence: ConstraintConfig {
                enabled: false,
                ..ConstraintConfig::soft(100)
            },
            sequence: ConstraintConfig {
                enabled: false,
                ..ConstraintConfig::soft(100)
            },
            shift_order_preference: ConstraintConfig::soft(100),
        }
    }
}
