//! Analysis engine
//!
//! Pure functions of a validated record set (and, for classification, a
//! threshold configuration). Nothing here performs I/O or holds state, so
//! any number of analyses can run side by side.

pub mod correlation;
pub mod outliers;
pub mod report;
pub mod safety;
pub mod stats;
pub mod summary;

pub use correlation::{CorrelationFinding, Interpretation};
pub use outliers::OutlierFinding;
pub use report::{AnalysisReport, SmartInsights};
pub use safety::{
    classify, classify_record, ParameterCheck, ParameterStatus, SafetyOverview, SafetyVerdict,
    StatusCounts, Tier,
};
pub use summary::Summary;

use crate::core::record::EquipmentRecord;

/// Build the analysis report for a record set
///
/// Summary, correlations and outliers are computed independently over the
/// same records. Safety classification is separate (see [`classify`]) since
/// it depends on thresholds that may change after the report is built.
pub fn analyze(records: &[EquipmentRecord]) -> AnalysisReport {
    let summary = summary::summarize(records);
    let insights = SmartInsights {
        correlations: correlation::find_correlations(records),
        outliers: outliers::find_outliers(records),
    };

    tracing::debug!(
        records = summary.total_equipment,
        correlations = insights.correlations.len(),
        outliers = insights.outliers.len(),
        "analysis complete"
    );

    AnalysisReport::new(summary, records.to_vec(), insights)
}
