//! Aggregate counts, per-parameter means and category distribution

use std::collections::BTreeMap;

use crate::analysis::stats;
use crate::core::record::{column, EquipmentRecord, Parameter};

/// Mean reported for a parameter when there are no records
pub const EMPTY_MEAN: f64 = 0.0;

/// Aggregate statistics over a record set
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_equipment: usize,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    /// Record count per distinct category, sorted by category name
    pub equipment_by_type: BTreeMap<String, usize>,
}

impl Summary {
    pub fn average(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Flowrate => self.avg_flowrate,
            Parameter::Pressure => self.avg_pressure,
            Parameter::Temperature => self.avg_temperature,
        }
    }
}

/// Compute the summary
///
/// With zero records every average is [`EMPTY_MEAN`] and the category map is empty.
pub fn summarize(records: &[EquipmentRecord]) -> Summary {
    let avg = |p: Parameter| stats::mean(&column(records, p)).unwrap_or(EMPTY_MEAN);

    let mut equipment_by_type = BTreeMap::new();
    for record in records {
        *equipment_by_type.entry(record.category.clone()).or_insert(0) += 1;
    }

    Summary {
        total_equipment: records.len(),
        avg_flowrate: avg(Parameter::Flowrate),
        avg_pressure: avg(Parameter::Pressure),
        avg_temperature: avg(Parameter::Temperature),
        equipment_by_type,
    }
}
