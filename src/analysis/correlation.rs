//! Pairwise correlation between numeric parameters
//!
//! Each unordered pair of parameters is tested once. Pairs whose coefficient
//! is undefined (zero variance, fewer than two records) are left out.

use serde::{Deserialize, Serialize};

use crate::analysis::stats;
use crate::core::record::{column, EquipmentRecord, Parameter};

/// Coefficients with magnitude at or below this are not reported
pub const SIGNIFICANCE: f64 = 0.5;

/// Coefficients beyond ±this are labelled strong
pub const STRONG: f64 = 0.7;

/// The three unordered parameter pairs, in reporting order
pub const PAIRS: [(Parameter, Parameter); 3] = [
    (Parameter::Flowrate, Parameter::Pressure),
    (Parameter::Flowrate, Parameter::Temperature),
    (Parameter::Pressure, Parameter::Temperature),
];

/// Qualitative label for a significant coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpretation {
    #[serde(rename = "Strong Positive")]
    StrongPositive,
    #[serde(rename = "Strong Negative")]
    StrongNegative,
    #[serde(rename = "Moderate")]
    Moderate,
}

impl Interpretation {
    pub fn from_coefficient(r: f64) -> Self {
        if r > STRONG {
            Interpretation::StrongPositive
        } else if r < -STRONG {
            Interpretation::StrongNegative
        } else {
            Interpretation::Moderate
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpretation::StrongPositive => write!(f, "Strong Positive"),
            Interpretation::StrongNegative => write!(f, "Strong Negative"),
            Interpretation::Moderate => write!(f, "Moderate"),
        }
    }
}

/// A significant relationship between two parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationFinding {
    /// Display label, e.g. "Flowrate vs Pressure"
    pub pair: String,
    /// Pearson coefficient, the same value the filter and label were decided from
    pub value: f64,
    pub interpretation: Interpretation,
}

pub fn pair_label(a: Parameter, b: Parameter) -> String {
    format!("{} vs {}", a.label(), b.label())
}

/// Find significant correlations, at most one per unordered pair
pub fn find_correlations(records: &[EquipmentRecord]) -> Vec<CorrelationFinding> {
    let findings: Vec<CorrelationFinding> = PAIRS
        .iter()
        .filter_map(|&(a, b)| {
            let r = stats::pearson(&column(records, a), &column(records, b))?;
            (r.abs() > SIGNIFICANCE).then(|| CorrelationFinding {
                pair: pair_label(a, b),
                value: r,
                interpretation: Interpretation::from_coefficient(r),
            })
        })
        .collect();

    tracing::debug!(count = findings.len(), "correlation findings");
    findings
}
