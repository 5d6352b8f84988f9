//! CLI command implementations

pub mod analyze;
pub mod classify;
pub mod completions;
pub mod demo;
pub mod template;
pub mod thresholds;
