//! EQA: Equipment Analytics
//!
//! Loads tabular equipment readings (flowrate, pressure, temperature),
//! summarizes them, surfaces correlations and statistical outliers, and
//! classifies every reading against safety thresholds.

pub mod analysis;
pub mod cli;
pub mod core;

pub use analysis::{analyze, classify, AnalysisReport, SafetyOverview, SafetyVerdict, Tier};
pub use crate::core::{EquipmentRecord, Parameter, ThresholdConfig};
