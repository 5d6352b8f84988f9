//! Z-score anomaly detection
//!
//! Parameters are scanned in order (flowrate, pressure, temperature) and,
//! within a parameter, records in input order. The accumulated list is cut to
//! [`MAX_OUTLIERS`] entries in that order, not by severity, so with more than
//! ten anomalies the most extreme ones may be dropped.

use serde::{Deserialize, Serialize};

use crate::analysis::stats;
use crate::core::record::{column, EquipmentRecord, Parameter};

/// Readings with |z| strictly above this are anomalies
pub const Z_THRESHOLD: f64 = 2.0;

/// Maximum number of findings kept in a report
pub const MAX_OUTLIERS: usize = 10;

/// A reading far from its parameter's mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierFinding {
    /// Equipment name
    pub equipment: String,
    pub parameter: Parameter,
    /// Observed value
    pub value: f64,
    /// Parameter mean, rounded to two decimals
    pub mean: f64,
    /// Signed z-score formatted as a multiple of σ, e.g. "+2.9σ"
    pub deviation: String,
    /// Unrounded signed z-score
    #[serde(skip)]
    pub z_score: f64,
}

pub fn format_deviation(z: f64) -> String {
    format!("{:+.1}σ", z)
}

pub fn is_outlier(z: f64) -> bool {
    z.abs() > Z_THRESHOLD
}

/// Outliers for a single parameter, in record order
///
/// Empty when the parameter has zero variance or fewer than two records.
pub fn parameter_outliers(records: &[EquipmentRecord], parameter: Parameter) -> Vec<OutlierFinding> {
    let values = column(records, parameter);
    let (Some(mean), Some(sd)) = (stats::mean(&values), stats::sample_std_dev(&values)) else {
        return Vec::new();
    };

    records
        .iter()
        .zip(values.iter())
        .filter_map(|(record, &value)| {
            let z = (value - mean) / sd;
            is_outlier(z).then(|| OutlierFinding {
                equipment: record.name.clone(),
                parameter,
                value,
                mean: stats::round_to(mean, 2),
                deviation: format_deviation(z),
                z_score: z,
            })
        })
        .collect()
}

/// All outliers across parameters, capped at [`MAX_OUTLIERS`]
pub fn find_outliers(records: &[EquipmentRecord]) -> Vec<OutlierFinding> {
    let all: Vec<OutlierFinding> = Parameter::ALL
        .iter()
        .flat_map(|&p| parameter_outliers(records, p))
        .collect();

    if all.len() > MAX_OUTLIERS {
        tracing::debug!(
            found = all.len(),
            kept = MAX_OUTLIERS,
            "outlier list truncated"
        );
    }

    all.into_iter().take(MAX_OUTLIERS).collect()
}
