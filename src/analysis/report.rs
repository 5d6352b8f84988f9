//! The analysis report returned to every consumer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::correlation::CorrelationFinding;
use crate::analysis::outliers::OutlierFinding;
use crate::analysis::summary::Summary;
use crate::core::record::{EquipmentRecord, Parameter};

/// Correlation and outlier findings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartInsights {
    pub correlations: Vec<CorrelationFinding>,
    pub outliers: Vec<OutlierFinding>,
}

/// Complete output of one analysis
///
/// Built once by [`crate::analysis::analyze`] and never mutated; the fields
/// are read through accessors. Serializes to the flat shape consumers expect:
/// `total_equipment`, `avg_*`, `equipment_by_type`, `equipment_data`,
/// `smart_insights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    total_equipment: usize,
    avg_flowrate: f64,
    avg_pressure: f64,
    avg_temperature: f64,
    equipment_by_type: BTreeMap<String, usize>,
    equipment_data: Vec<EquipmentRecord>,
    smart_insights: SmartInsights,
}

impl AnalysisReport {
    pub(crate) fn new(
        summary: Summary,
        records: Vec<EquipmentRecord>,
        insights: SmartInsights,
    ) -> Self {
        Self {
            total_equipment: summary.total_equipment,
            avg_flowrate: summary.avg_flowrate,
            avg_pressure: summary.avg_pressure,
            avg_temperature: summary.avg_temperature,
            equipment_by_type: summary.equipment_by_type,
            equipment_data: records,
            smart_insights: insights,
        }
    }

    pub fn total_equipment(&self) -> usize {
        self.total_equipment
    }

    pub fn average(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Flowrate => self.avg_flowrate,
            Parameter::Pressure => self.avg_pressure,
            Parameter::Temperature => self.avg_temperature,
        }
    }

    pub fn equipment_by_type(&self) -> &BTreeMap<String, usize> {
        &self.equipment_by_type
    }

    /// Records in their original input order
    pub fn records(&self) -> &[EquipmentRecord] {
        &self.equipment_data
    }

    pub fn correlations(&self) -> &[CorrelationFinding] {
        &self.smart_insights.correlations
    }

    pub fn outliers(&self) -> &[OutlierFinding] {
        &self.smart_insights.outliers
    }

    pub fn insights(&self) -> &SmartInsights {
        &self.smart_insights
    }
}
