//! Error types with diagnostics for table loading and threshold handling

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::record::Parameter;

/// Input table does not satisfy the loader contract
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum ValidationError {
    #[error(
        "Missing required column(s): {}. Found: {}",
        .missing.join(", "),
        .present.join(", ")
    )]
    #[diagnostic(
        code(eqa::table::missing_columns),
        help("Required columns: Equipment Name, Type, Flowrate, Pressure, Temperature")
    )]
    MissingColumns {
        /// Required columns not found in the header
        missing: Vec<String>,
        /// Columns actually present in the header
        present: Vec<String>,
        /// Full list of required columns
        required: Vec<String>,
    },

    #[error("Row {row}: column '{column}' has non-numeric value '{value}'")]
    #[diagnostic(
        code(eqa::table::malformed_value),
        help("Flowrate, Pressure and Temperature must be finite numbers")
    )]
    MalformedValue {
        /// 1-based data row number (the header is not counted)
        row: usize,
        column: String,
        value: String,
    },
}

/// Failure to produce a validated record set
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("CSV read error: {0}")]
    #[diagnostic(code(eqa::table::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(eqa::table::io))]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// The validation failure, if this error is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            LoadError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Threshold file could not be read or written
#[derive(Debug, Error, Diagnostic)]
pub enum ThresholdError {
    #[error("Failed to access threshold file {path}: {source}")]
    #[diagnostic(code(eqa::thresholds::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid threshold file {path}: {message}")]
    #[diagnostic(
        code(eqa::thresholds::parse),
        help("Expected keys flowrate, pressure, temperature, each with min, max, critical_max")
    )]
    Parse { path: PathBuf, message: String },
}

/// Threshold ordering problem (`min <= max <= critical_max` violated)
///
/// Only reported by [`crate::core::ThresholdConfig::ordering_issues`];
/// the engine itself accepts such configurations unchanged.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq)]
pub enum ConfigError {
    #[error("{parameter}: min ({min}) is greater than max ({max})")]
    #[diagnostic(code(eqa::thresholds::min_above_max))]
    MinAboveMax { parameter: Parameter, min: f64, max: f64 },

    #[error("{parameter}: max ({max}) is greater than critical_max ({critical_max})")]
    #[diagnostic(code(eqa::thresholds::max_above_critical))]
    MaxAboveCriticalMax {
        parameter: Parameter,
        max: f64,
        critical_max: f64,
    },
}
