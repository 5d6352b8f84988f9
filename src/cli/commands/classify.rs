//! `eqa classify` command - Safety classification of every reading

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::analysis::{classify, ParameterStatus, SafetyOverview, SafetyVerdict, Tier};
use crate::cli::helpers::{
    effective_format, escape_csv, escape_tsv, load_table, resolve_thresholds, styled_tier,
    write_output,
};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Parameter, ThresholdConfig};

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// CSV file with columns: Equipment Name, Type, Flowrate, Pressure, Temperature
    pub file: PathBuf,

    /// Only list records with at least one violation
    #[arg(long)]
    pub alerts_only: bool,

    /// Exit with a non-zero status when any record is critical
    #[arg(long)]
    pub fail_on_critical: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Machine-readable classification output
#[derive(Serialize)]
struct ClassificationOutput<'a> {
    thresholds: &'a ThresholdConfig,
    critical_count: usize,
    warning_count: usize,
    safe_count: usize,
    parameter_status: &'a ParameterStatus,
    verdicts: Vec<&'a SafetyVerdict>,
}

pub fn run(args: ClassifyArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let thresholds = resolve_thresholds(global, &config)?;
    let records = load_table(&args.file)?;

    let verdicts = classify(&records, &thresholds);
    let overview = SafetyOverview::from_verdicts(&verdicts);

    let shown: Vec<&SafetyVerdict> = verdicts
        .iter()
        .filter(|v| !args.alerts_only || v.is_alert())
        .collect();

    let content = match effective_format(global, &config) {
        OutputFormat::Auto if args.output.is_none() => {
            print_verdicts(&shown, &overview, global.quiet);
            None
        }
        OutputFormat::Auto | OutputFormat::Md => Some(render_markdown(&shown, &overview)),
        OutputFormat::Json => {
            let out = machine_output(&thresholds, &overview, shown.clone());
            let mut json = serde_json::to_string_pretty(&out).into_diagnostic()?;
            json.push('\n');
            Some(json)
        }
        OutputFormat::Yaml => {
            let out = machine_output(&thresholds, &overview, shown.clone());
            Some(serde_yml::to_string(&out).into_diagnostic()?)
        }
        OutputFormat::Csv => Some(render_delimited(&shown, ',', escape_csv)),
        OutputFormat::Tsv => Some(render_delimited(&shown, '\t', escape_tsv)),
    };

    if let Some(content) = content {
        write_output(&content, args.output)?;
    }

    if args.fail_on_critical && overview.critical_count > 0 {
        return Err(miette::miette!(
            "{} record(s) exceed critical limits",
            overview.critical_count
        ));
    }

    Ok(())
}

fn machine_output<'a>(
    thresholds: &'a ThresholdConfig,
    overview: &'a SafetyOverview,
    verdicts: Vec<&'a SafetyVerdict>,
) -> ClassificationOutput<'a> {
    ClassificationOutput {
        thresholds,
        critical_count: overview.critical_count,
        warning_count: overview.warning_count,
        safe_count: overview.safe_count,
        parameter_status: &overview.parameter_status,
        verdicts,
    }
}

fn print_verdicts(shown: &[&SafetyVerdict], overview: &SafetyOverview, quiet: bool) {
    if overview.all_normal() {
        println!("{} {}", style("✓").green(), style("All Systems Normal").green().bold());
        if !quiet {
            println!("  All equipment operating within safe parameters");
        }
    } else {
        let mut parts = Vec::new();
        if overview.critical_count > 0 {
            parts.push(
                style(format!("{} Critical", overview.critical_count))
                    .red()
                    .bold()
                    .to_string(),
            );
        }
        if overview.warning_count > 0 {
            parts.push(
                style(format!("{} Warning", overview.warning_count))
                    .yellow()
                    .to_string(),
            );
        }
        println!(
            "{} {} - {}",
            style("!").red().bold(),
            style("Safety Alerts Detected").bold(),
            parts.join(" • ")
        );
    }

    if !shown.is_empty() {
        println!();
    }
    for verdict in shown {
        println!(
            "{:<10} {} {}",
            styled_tier(verdict.tier),
            style(&verdict.equipment).bold(),
            style(format!("({})", verdict.category)).dim()
        );
        for message in &verdict.messages {
            let line = match verdict.tier {
                Tier::Critical => style(message.as_str()).red(),
                _ => style(message.as_str()).yellow(),
            };
            println!("           {}", line);
        }
    }

    if !quiet {
        println!();
        println!("{}", style("Status by Parameter").bold());
        println!("{}", style("─".repeat(50)).dim());
        for p in Parameter::ALL {
            let counts = overview.parameter_status.get(p);
            println!(
                "  {:<12} {} safe  {} warning  {} critical",
                p.label(),
                style(counts.safe).green(),
                style(counts.warning).yellow(),
                style(counts.critical).red()
            );
        }
    }
}

fn render_markdown(shown: &[&SafetyVerdict], overview: &SafetyOverview) -> String {
    let mut output = String::new();
    output.push_str("# Safety Classification\n\n");

    let mut builder = Builder::default();
    builder.push_record(["Equipment", "Type", "Tier", "Flowrate", "Pressure", "Temperature"]);
    for v in shown {
        builder.push_record([
            v.equipment.clone(),
            v.category.clone(),
            v.tier.to_string(),
            v.tier_of(Parameter::Flowrate).to_string(),
            v.tier_of(Parameter::Pressure).to_string(),
            v.tier_of(Parameter::Temperature).to_string(),
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str("\n## Summary\n\n");
    output.push_str(&format!("- **Critical:** {}\n", overview.critical_count));
    output.push_str(&format!("- **Warning:** {}\n", overview.warning_count));
    output.push_str(&format!("- **Safe:** {}\n", overview.safe_count));
    if overview.all_normal() {
        output.push_str("\nAll Systems Normal\n");
    }

    let with_messages: Vec<_> = shown.iter().filter(|v| !v.messages.is_empty()).collect();
    if !with_messages.is_empty() {
        output.push_str("\n## Violations\n\n");
        for v in with_messages {
            for message in &v.messages {
                output.push_str(&format!("- **{}**: {}\n", v.equipment, message));
            }
        }
    }

    output
}

fn render_delimited(shown: &[&SafetyVerdict], sep: char, escape: fn(&str) -> String) -> String {
    let header = ["equipment", "type", "tier", "flowrate", "pressure", "temperature", "messages"];
    let mut out = header.join(&sep.to_string());
    out.push('\n');

    for v in shown {
        let fields = [
            v.equipment.clone(),
            v.category.clone(),
            v.tier.to_string(),
            v.tier_of(Parameter::Flowrate).to_string(),
            v.tier_of(Parameter::Pressure).to_string(),
            v.tier_of(Parameter::Temperature).to_string(),
            v.messages.join("; "),
        ];
        let escaped: Vec<String> = fields.iter().map(|f| escape(f)).collect();
        out.push_str(&escaped.join(&sep.to_string()));
        out.push('\n');
    }
    out
}
