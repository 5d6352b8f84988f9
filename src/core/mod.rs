//! Core module - records, thresholds, table loading and configuration

pub mod config;
pub mod error;
pub mod loader;
pub mod record;
pub mod thresholds;

pub use config::Config;
pub use error::{ConfigError, LoadError, ThresholdError, ValidationError};
pub use loader::{load_csv, load_path, load_rows, REQUIRED_COLUMNS};
pub use record::{EquipmentRecord, Parameter};
pub use thresholds::{LimitField, Limits, ThresholdConfig};
