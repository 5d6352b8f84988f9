//! `eqa analyze` command - Summarize a CSV of equipment readings

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::analysis::{analyze, classify, AnalysisReport, SafetyOverview};
use crate::cli::helpers::{
    effective_format, escape_csv, escape_tsv, load_table, resolve_thresholds, styled_tier,
    truncate_str, write_output,
};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Parameter};

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// CSV file with columns: Equipment Name, Type, Flowrate, Pressure, Temperature
    pub file: PathBuf,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Skip the safety section in terminal and markdown output
    #[arg(long)]
    pub no_safety: bool,
}

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let records = load_table(&args.file)?;
    let report = analyze(&records);

    let safety = if args.no_safety {
        None
    } else {
        let thresholds = resolve_thresholds(global, &config)?;
        Some(SafetyOverview::from_verdicts(&classify(report.records(), &thresholds)))
    };

    let content = match effective_format(global, &config) {
        OutputFormat::Auto => {
            if args.output.is_none() {
                print_summary(&report, safety.as_ref(), &args.file, global.quiet);
                return Ok(());
            }
            render_markdown(&report, safety.as_ref())
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(&report).into_diagnostic()?,
        OutputFormat::Md => render_markdown(&report, safety.as_ref()),
        OutputFormat::Csv => render_metrics(&report, ',', escape_csv),
        OutputFormat::Tsv => render_metrics(&report, '\t', escape_tsv),
    };

    write_output(&content, args.output)
}

fn print_summary(
    report: &AnalysisReport,
    safety: Option<&SafetyOverview>,
    file: &std::path::Path,
    quiet: bool,
) {
    if !quiet {
        println!(
            "{} Analyzed {} record(s) from {}",
            style("→").blue(),
            style(report.total_equipment()).cyan(),
            style(file.display()).yellow()
        );
        println!();
    }

    println!("{}", style("Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Total equipment:  {}", style(report.total_equipment()).cyan());
    for p in Parameter::ALL {
        println!(
            "  Avg {:<13} {}",
            format!("{}:", p.as_str()),
            style(format!("{:.2}", report.average(p))).cyan()
        );
    }

    println!();
    println!("{}", style("Equipment by Type").bold());
    println!("{}", style("─".repeat(50)).dim());
    if report.equipment_by_type().is_empty() {
        println!("  {}", style("No equipment").dim());
    }
    for (category, count) in report.equipment_by_type() {
        println!("  {:<24} {}", truncate_str(category, 24), count);
    }

    println!();
    println!("{}", style("Parameter Correlations").bold());
    println!("{}", style("─".repeat(50)).dim());
    if report.correlations().is_empty() {
        println!("  {}", style("No significant correlations found.").dim());
    }
    for c in report.correlations() {
        let value = format!("{:+.2}", c.value);
        let value = if c.value > 0.0 {
            style(value).green()
        } else {
            style(value).red()
        };
        println!("  {:<28} {}  {}", c.pair, value, style(c.interpretation).dim());
    }

    println!();
    println!("{}", style("Statistical Deviations (|z| > 2σ)").bold());
    println!("{}", style("─".repeat(50)).dim());
    if report.outliers().is_empty() {
        println!("  {}", style("No statistical anomalies detected.").dim());
    }
    for o in report.outliers() {
        println!(
            "  {:>7}  {:<20} {:<12} {:>10.1}  {}",
            style(&o.deviation).color256(208),
            truncate_str(&o.equipment, 20),
            o.parameter.as_str(),
            o.value,
            style(format!("avg {}", o.mean)).dim()
        );
    }

    if let Some(overview) = safety {
        println!();
        println!("{}", style("Safety").bold());
        println!("{}", style("─".repeat(50)).dim());
        if overview.all_normal() {
            println!(
                "  {} All Systems Normal - all equipment within safe parameters",
                style("✓").green()
            );
        } else {
            println!(
                "  {} {} critical, {} warning, {} safe (run `eqa classify` for details)",
                styled_tier(overview.worst()),
                style(overview.critical_count).red(),
                style(overview.warning_count).yellow(),
                style(overview.safe_count).green()
            );
        }
    }
}

/// Markdown report with summary, distribution, data, insights and safety sections
pub fn render_markdown(report: &AnalysisReport, safety: Option<&SafetyOverview>) -> String {
    let mut output = String::new();
    output.push_str("# Equipment Analysis Report\n\n");

    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- **Total Equipment:** {}\n",
        report.total_equipment()
    ));
    for p in Parameter::ALL {
        output.push_str(&format!(
            "- **Average {}:** {:.2}\n",
            p.label(),
            report.average(p)
        ));
    }

    output.push_str("\n## Equipment by Type\n\n");
    if report.equipment_by_type().is_empty() {
        output.push_str("_No equipment._\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Type", "Count"]);
        for (category, count) in report.equipment_by_type() {
            builder.push_record([category.clone(), count.to_string()]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    output.push_str("\n## Equipment Data\n\n");
    if report.records().is_empty() {
        output.push_str("_No records._\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Name", "Type", "Flowrate", "Pressure", "Temperature"]);
        for r in report.records() {
            builder.push_record([
                r.name.clone(),
                r.category.clone(),
                format!("{:.1}", r.flowrate),
                format!("{:.1}", r.pressure),
                format!("{:.1}", r.temperature),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    output.push_str("\n## Parameter Correlations\n\n");
    if report.correlations().is_empty() {
        output.push_str("No significant correlations found.\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Pair", "Coefficient", "Interpretation"]);
        for c in report.correlations() {
            builder.push_record([
                c.pair.clone(),
                format!("{:.2}", c.value),
                c.interpretation.to_string(),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    output.push_str("\n## Statistical Deviations\n\n");
    if report.outliers().is_empty() {
        output.push_str("No statistical anomalies detected.\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Equipment", "Parameter", "Value", "Mean", "Deviation"]);
        for o in report.outliers() {
            builder.push_record([
                o.equipment.clone(),
                o.parameter.label().to_string(),
                format!("{:.1}", o.value),
                o.mean.to_string(),
                o.deviation.clone(),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    if let Some(overview) = safety {
        output.push_str("\n## Safety Status\n\n");
        output.push_str(&format!("- **Critical:** {}\n", overview.critical_count));
        output.push_str(&format!("- **Warning:** {}\n", overview.warning_count));
        output.push_str(&format!("- **Safe:** {}\n", overview.safe_count));

        if overview.all_normal() {
            output.push_str("\nAll Systems Normal: all equipment operating within safe parameters.\n");
        } else {
            output.push_str("\n### Alerts\n\n");
            for alert in &overview.alerts {
                output.push_str(&format!(
                    "- **{}** ({}) - {}\n",
                    alert.equipment, alert.category, alert.tier
                ));
                for message in &alert.messages {
                    output.push_str(&format!("  - {}\n", message));
                }
            }
        }
    }

    output
}

/// Flat metric/value table for spreadsheets
fn render_metrics(report: &AnalysisReport, sep: char, escape: fn(&str) -> String) -> String {
    let mut rows: Vec<(String, String)> = vec![(
        "total_equipment".to_string(),
        report.total_equipment().to_string(),
    )];
    for p in Parameter::ALL {
        rows.push((format!("avg_{}", p.as_str()), report.average(p).to_string()));
    }
    for (category, count) in report.equipment_by_type() {
        rows.push((format!("type:{}", category), count.to_string()));
    }
    for c in report.correlations() {
        rows.push((format!("correlation:{}", c.pair), c.value.to_string()));
    }
    rows.push((
        "outliers".to_string(),
        report.outliers().len().to_string(),
    ));

    let mut out = format!("metric{}value\n", sep);
    for (metric, value) in rows {
        out.push_str(&format!("{}{}{}\n", escape(&metric), sep, escape(&value)));
    }
    out
}
