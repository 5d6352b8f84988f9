//! Safety threshold configuration
//!
//! A [`ThresholdConfig`] is an immutable input to classification. It is passed
//! explicitly into every call; nothing in the engine reads a global copy.
//! Loading and saving a user's preferred thresholds lives here as plain file
//! I/O so callers can thread the result through.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, ThresholdError};
use crate::core::record::Parameter;

/// Boundaries for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Lowest safe value (inclusive)
    pub min: f64,
    /// Highest safe value (inclusive)
    pub max: f64,
    /// Values strictly above this are critical
    pub critical_max: f64,
}

impl Limits {
    pub const fn new(min: f64, max: f64, critical_max: f64) -> Self {
        Self {
            min,
            max,
            critical_max,
        }
    }
}

pub const DEFAULT_FLOWRATE: Limits = Limits::new(50.0, 500.0, 600.0);
pub const DEFAULT_PRESSURE: Limits = Limits::new(100.0, 800.0, 1000.0);
pub const DEFAULT_TEMPERATURE: Limits = Limits::new(50.0, 350.0, 400.0);

fn default_flowrate() -> Limits {
    DEFAULT_FLOWRATE
}

fn default_pressure() -> Limits {
    DEFAULT_PRESSURE
}

fn default_temperature() -> Limits {
    DEFAULT_TEMPERATURE
}

/// Per-parameter limits used by the safety classifier
///
/// Any parameter missing from a deserialized file takes its default limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_flowrate")]
    pub flowrate: Limits,

    #[serde(default = "default_pressure")]
    pub pressure: Limits,

    #[serde(default = "default_temperature")]
    pub temperature: Limits,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            flowrate: DEFAULT_FLOWRATE,
            pressure: DEFAULT_PRESSURE,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ThresholdConfig {
    pub fn limits(&self, parameter: Parameter) -> &Limits {
        match parameter {
            Parameter::Flowrate => &self.flowrate,
            Parameter::Pressure => &self.pressure,
            Parameter::Temperature => &self.temperature,
        }
    }

    pub fn limits_mut(&mut self, parameter: Parameter) -> &mut Limits {
        match parameter {
            Parameter::Flowrate => &mut self.flowrate,
            Parameter::Pressure => &mut self.pressure,
            Parameter::Temperature => &mut self.temperature,
        }
    }

    /// Return a copy with one field of one parameter replaced
    pub fn with_field(mut self, parameter: Parameter, field: LimitField, value: f64) -> Self {
        let limits = self.limits_mut(parameter);
        match field {
            LimitField::Min => limits.min = value,
            LimitField::Max => limits.max = value,
            LimitField::CriticalMax => limits.critical_max = value,
        }
        self
    }

    /// List ordering problems (`min > max` or `max > critical_max`)
    ///
    /// Classification does not consult this; degenerate configurations are
    /// evaluated exactly as given.
    pub fn ordering_issues(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();
        for parameter in Parameter::ALL {
            let l = self.limits(parameter);
            if l.min > l.max {
                issues.push(ConfigError::MinAboveMax {
                    parameter,
                    min: l.min,
                    max: l.max,
                });
            }
            if l.max > l.critical_max {
                issues.push(ConfigError::MaxAboveCriticalMax {
                    parameter,
                    max: l.max,
                    critical_max: l.critical_max,
                });
            }
        }
        issues
    }

    /// Load thresholds from a YAML or JSON file (JSON when the extension is `.json`)
    pub fn load_from(path: &Path) -> Result<Self, ThresholdError> {
        let content = fs::read_to_string(path).map_err(|source| ThresholdError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if is_json(path) {
            serde_json::from_str::<ThresholdConfig>(&content).map_err(|e| e.to_string())
        } else if content.trim().is_empty() {
            Ok(ThresholdConfig::default())
        } else {
            serde_yml::from_str::<ThresholdConfig>(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ThresholdError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load thresholds if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ThresholdError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save thresholds, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), ThresholdError> {
        let io_err = |source| ThresholdError::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| e.to_string())
        } else {
            serde_yml::to_string(self).map_err(|e| e.to_string())
        }
        .map_err(|message| ThresholdError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        fs::write(path, content).map_err(io_err)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("json"))
}

/// Name of a single field within [`Limits`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitField {
    Min,
    Max,
    CriticalMax,
}

impl std::str::FromStr for LimitField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "min" => Ok(LimitField::Min),
            "max" => Ok(LimitField::Max),
            "critical_max" | "critical" => Ok(LimitField::CriticalMax),
            _ => Err(format!(
                "Unknown threshold field: '{}'. Use min, max, or critical_max",
                s
            )),
        }
    }
}
