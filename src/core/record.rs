//! Equipment records and the numeric parameters they carry

use serde::{Deserialize, Serialize};

/// One of the three numeric parameters measured on every piece of equipment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Flowrate,
    Pressure,
    Temperature,
}

impl Parameter {
    /// All parameters in reporting order
    pub const ALL: [Parameter; 3] = [
        Parameter::Flowrate,
        Parameter::Pressure,
        Parameter::Temperature,
    ];

    /// Lowercase key used in threshold files and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Flowrate => "flowrate",
            Parameter::Pressure => "pressure",
            Parameter::Temperature => "temperature",
        }
    }

    /// Capitalized name, also the CSV column header
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Flowrate => "Flowrate",
            Parameter::Pressure => "Pressure",
            Parameter::Temperature => "Temperature",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flowrate" | "flow" => Ok(Parameter::Flowrate),
            "pressure" => Ok(Parameter::Pressure),
            "temperature" | "temp" => Ok(Parameter::Temperature),
            _ => Err(format!(
                "Unknown parameter: '{}'. Use flowrate, pressure, or temperature",
                s
            )),
        }
    }
}

/// A single equipment reading
///
/// Serializes as `{name, type, flowrate, pressure, temperature}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    /// Equipment name (e.g., "Pump A")
    pub name: String,

    /// Equipment category (e.g., "Pump", "Reactor")
    #[serde(rename = "type")]
    pub category: String,

    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl EquipmentRecord {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        flowrate: f64,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            flowrate,
            pressure,
            temperature,
        }
    }

    /// Get the reading for a parameter
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Flowrate => self.flowrate,
            Parameter::Pressure => self.pressure,
            Parameter::Temperature => self.temperature,
        }
    }
}

/// Collect one parameter's column across a record set, preserving order
pub fn column(records: &[EquipmentRecord], parameter: Parameter) -> Vec<f64> {
    records.iter().map(|r| r.value(parameter)).collect()
}
