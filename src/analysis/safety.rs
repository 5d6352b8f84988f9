//! Safety classification against a threshold configuration
//!
//! Every (record, parameter) pair lands in one tier:
//!
//! | Tier     | Condition                                  |
//! |----------|--------------------------------------------|
//! | safe     | `min <= value <= max`                      |
//! | warning  | `value < min` or `max < value <= critical_max` |
//! | critical | `value > critical_max`                     |
//!
//! A record's tier is the worst of its three parameters. Verdicts are never
//! cached: they are recomputed from the records and whatever thresholds the
//! caller holds at the time.

use serde::{Deserialize, Serialize};

use crate::core::record::{EquipmentRecord, Parameter};
use crate::core::thresholds::{Limits, ThresholdConfig};

/// Safety tier, ordered from best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Safe,
    Warning,
    Critical,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Safe => write!(f, "safe"),
            Tier::Warning => write!(f, "warning"),
            Tier::Critical => write!(f, "critical"),
        }
    }
}

/// Why a single reading is outside its safe band
#[derive(Debug, Clone, Copy, PartialEq)]
enum Violation {
    AboveCritical,
    AboveMax,
    BelowMin,
}

impl Violation {
    fn tier(self) -> Tier {
        match self {
            Violation::AboveCritical => Tier::Critical,
            Violation::AboveMax | Violation::BelowMin => Tier::Warning,
        }
    }
}

/// Compare one value with its limits
///
/// Checked critical first, then the upper then lower safe bound, which
/// keeps the result deterministic for configurations that are not ordered.
fn check(value: f64, limits: &Limits) -> Option<Violation> {
    if value > limits.critical_max {
        Some(Violation::AboveCritical)
    } else if value > limits.max {
        Some(Violation::AboveMax)
    } else if value < limits.min {
        Some(Violation::BelowMin)
    } else {
        None
    }
}

fn message(parameter: Parameter, value: f64, limits: &Limits, violation: Violation) -> String {
    let name = parameter.label();
    match violation {
        Violation::AboveCritical => format!(
            "CRITICAL: {} {:.1} exceeds critical limit {}",
            name, value, limits.critical_max
        ),
        Violation::AboveMax => format!(
            "{} {:.1} exceeds safe maximum {}",
            name, value, limits.max
        ),
        Violation::BelowMin => format!(
            "{} {:.1} below safe minimum {}",
            name, value, limits.min
        ),
    }
}

/// Tier of a single reading
pub fn classify_value(value: f64, limits: &Limits) -> Tier {
    check(value, limits).map_or(Tier::Safe, Violation::tier)
}

/// Result of checking one parameter of one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterCheck {
    pub parameter: Parameter,
    pub value: f64,
    pub tier: Tier,
}

/// Classification of one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub equipment: String,
    #[serde(rename = "type")]
    pub category: String,
    /// Worst tier among the record's parameters
    pub tier: Tier,
    /// One message per violated parameter, in flowrate, pressure, temperature order
    pub messages: Vec<String>,
    pub checks: Vec<ParameterCheck>,
}

impl SafetyVerdict {
    pub fn is_alert(&self) -> bool {
        self.tier != Tier::Safe
    }

    pub fn tier_of(&self, parameter: Parameter) -> Tier {
        self.checks
            .iter()
            .find(|c| c.parameter == parameter)
            .map_or(Tier::Safe, |c| c.tier)
    }
}

/// Classify a single record
pub fn classify_record(record: &EquipmentRecord, thresholds: &ThresholdConfig) -> SafetyVerdict {
    let mut messages = Vec::new();
    let mut checks = Vec::with_capacity(Parameter::ALL.len());

    for parameter in Parameter::ALL {
        let value = record.value(parameter);
        let limits = thresholds.limits(parameter);
        let violation = check(value, limits);

        if let Some(v) = violation {
            messages.push(message(parameter, value, limits, v));
        }
        checks.push(ParameterCheck {
            parameter,
            value,
            tier: violation.map_or(Tier::Safe, Violation::tier),
        });
    }

    let tier = checks.iter().map(|c| c.tier).max().unwrap_or_default();

    SafetyVerdict {
        equipment: record.name.clone(),
        category: record.category.clone(),
        tier,
        messages,
        checks,
    }
}

/// Classify every record, one verdict per record in input order
pub fn classify(records: &[EquipmentRecord], thresholds: &ThresholdConfig) -> Vec<SafetyVerdict> {
    records
        .iter()
        .map(|r| classify_record(r, thresholds))
        .collect()
}

/// Tier counts for one parameter across all records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub safe: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusCounts {
    fn add(&mut self, tier: Tier) {
        match tier {
            Tier::Safe => self.safe += 1,
            Tier::Warning => self.warning += 1,
            Tier::Critical => self.critical += 1,
        }
    }
}

/// Per-parameter status distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterStatus {
    pub flowrate: StatusCounts,
    pub pressure: StatusCounts,
    pub temperature: StatusCounts,
}

impl ParameterStatus {
    pub fn get(&self, parameter: Parameter) -> &StatusCounts {
        match parameter {
            Parameter::Flowrate => &self.flowrate,
            Parameter::Pressure => &self.pressure,
            Parameter::Temperature => &self.temperature,
        }
    }

    fn get_mut(&mut self, parameter: Parameter) -> &mut StatusCounts {
        match parameter {
            Parameter::Flowrate => &mut self.flowrate,
            Parameter::Pressure => &mut self.pressure,
            Parameter::Temperature => &mut self.temperature,
        }
    }
}

/// Aggregate view of a set of verdicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyOverview {
    pub critical_count: usize,
    pub warning_count: usize,
    pub safe_count: usize,
    pub parameter_status: ParameterStatus,
    /// Verdicts with at least one violation, in record order
    pub alerts: Vec<SafetyVerdict>,
}

impl SafetyOverview {
    pub fn from_verdicts(verdicts: &[SafetyVerdict]) -> Self {
        let mut overview = SafetyOverview {
            critical_count: 0,
            warning_count: 0,
            safe_count: 0,
            parameter_status: ParameterStatus::default(),
            alerts: Vec::new(),
        };

        for verdict in verdicts {
            match verdict.tier {
                Tier::Safe => overview.safe_count += 1,
                Tier::Warning => overview.warning_count += 1,
                Tier::Critical => overview.critical_count += 1,
            }
            for check in &verdict.checks {
                overview.parameter_status.get_mut(check.parameter).add(check.tier);
            }
            if verdict.is_alert() {
                overview.alerts.push(verdict.clone());
            }
        }

        tracing::debug!(
            critical = overview.critical_count,
            warning = overview.warning_count,
            safe = overview.safe_count,
            "safety classification"
        );
        overview
    }

    /// True when no record violates any threshold ("All Systems Normal")
    pub fn all_normal(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Worst tier across all records
    pub fn worst(&self) -> Tier {
        if self.critical_count > 0 {
            Tier::Critical
        } else if self.warning_count > 0 {
            Tier::Warning
        } else {
            Tier::Safe
        }
    }
}
