//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    analyze::AnalyzeArgs, classify::ClassifyArgs, completions::CompletionsArgs, demo::DemoArgs,
    template::TemplateArgs, thresholds::ThresholdCommands,
};

#[derive(Parser)]
#[command(name = "eqa")]
#[command(author, version, about = "Equipment Analytics Toolkit")]
#[command(long_about = "Analyze equipment readings from CSV: summary statistics, parameter correlations, statistical outliers, and safety classification against configurable thresholds.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Threshold file (YAML or JSON) overriding the configured one
    #[arg(long, global = true)]
    pub thresholds: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a CSV of equipment readings (averages, types, correlations, outliers)
    Analyze(AnalyzeArgs),

    /// Classify every reading as safe, warning, or critical
    Classify(ClassifyArgs),

    /// View and edit safety thresholds
    #[command(subcommand)]
    Thresholds(ThresholdCommands),

    /// Print the expected CSV layout
    Template(TemplateArgs),

    /// Generate a synthetic demo dataset
    Demo(DemoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary for the terminal
    #[default]
    Auto,
    /// JSON (for programs and web clients)
    Json,
    /// YAML
    Yaml,
    /// Markdown tables (for reports)
    Md,
    /// CSV format (for spreadsheets)
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
}

impl OutputFormat {
    /// Apply the configured default when the user left the format on auto
    pub fn or_configured(self, configured: Option<&str>) -> Self {
        match (self, configured) {
            (OutputFormat::Auto, Some(name)) => {
                OutputFormat::from_str(name, true).unwrap_or(OutputFormat::Auto)
            }
            (format, _) => format,
        }
    }
}
