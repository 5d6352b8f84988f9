//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::{style, StyledObject};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analysis::Tier;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{load_path, Config, EquipmentRecord, ThresholdConfig};

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Escape a string for TSV output (tabs and newlines become spaces)
pub fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n'], " ")
}

/// Color a tier label for terminal output
pub fn styled_tier(tier: Tier) -> StyledObject<String> {
    let label = tier.to_string().to_uppercase();
    match tier {
        Tier::Safe => style(label).green(),
        Tier::Warning => style(label).yellow(),
        Tier::Critical => style(label).red().bold(),
    }
}

/// Write report content to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            eprintln!(
                "{} Report written to: {}",
                style("✓").green(),
                style(path.display()).yellow()
            );
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

/// Load and validate a CSV table, failing with a diagnostic
pub fn load_table(path: &Path) -> Result<Vec<EquipmentRecord>> {
    if !path.exists() {
        return Err(miette::miette!("File not found: {}", path.display()));
    }
    Ok(load_path(path)?)
}

/// Effective output format after applying the configured default
pub fn effective_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.format.or_configured(config.default_format.as_deref())
}

/// Resolve thresholds for a command, warning about ordering problems
pub fn resolve_thresholds(global: &GlobalOpts, config: &Config) -> Result<ThresholdConfig> {
    let thresholds = config.resolve_thresholds(global.thresholds.as_deref())?;
    for issue in thresholds.ordering_issues() {
        tracing::warn!("threshold ordering: {}", issue);
    }
    Ok(thresholds)
}
