//! `eqa thresholds` command - Safety threshold management
//!
//! Thresholds persist to a YAML (or JSON) file. The file in use is chosen by
//! `--thresholds`, then `EQA_THRESHOLDS` or the `thresholds` config key, then
//! the default location under the user config directory.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, LimitField, Parameter, ThresholdConfig};

#[derive(Subcommand, Debug)]
pub enum ThresholdCommands {
    /// Show the effective thresholds
    Show,

    /// Show the path of the threshold file in use
    Path,

    /// Write the default thresholds to the threshold file
    Init(InitArgs),

    /// Set one limit of one parameter
    Set(SetArgs),

    /// Restore the default thresholds
    Reset,

    /// Report ordering problems (min > max, max > critical_max)
    Check,
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing threshold file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Parameter (flowrate, pressure, temperature)
    pub parameter: Parameter,

    /// Field (min, max, critical_max)
    pub field: LimitField,

    /// New value
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

/// Run a thresholds subcommand
pub fn run(cmd: ThresholdCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    match cmd {
        ThresholdCommands::Show => run_show(&config, global),
        ThresholdCommands::Path => run_path(&config, global),
        ThresholdCommands::Init(args) => run_init(args, &config, global),
        ThresholdCommands::Set(args) => run_set(args, &config, global),
        ThresholdCommands::Reset => run_reset(&config, global),
        ThresholdCommands::Check => run_check(&config, global),
    }
}

fn threshold_file(config: &Config, global: &GlobalOpts) -> Result<PathBuf> {
    config
        .thresholds_path(global.thresholds.as_deref())
        .ok_or_else(|| miette::miette!("Could not determine config directory; pass --thresholds"))
}

fn run_show(config: &Config, global: &GlobalOpts) -> Result<()> {
    let thresholds = config.resolve_thresholds(global.thresholds.as_deref())?;

    let format = effective_format(global, config);
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&thresholds).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&thresholds).into_diagnostic()?);
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let sep = if format == OutputFormat::Tsv { '\t' } else { ',' };
            println!("parameter{sep}min{sep}max{sep}critical_max");
            for p in Parameter::ALL {
                let l = thresholds.limits(p);
                println!(
                    "{}{sep}{}{sep}{}{sep}{}",
                    p.as_str(),
                    l.min,
                    l.max,
                    l.critical_max
                );
            }
        }
        OutputFormat::Md => print!("{}", render_markdown(&thresholds)),
        OutputFormat::Auto => {
            print_table(&thresholds);
            if !global.quiet {
                println!();
                match threshold_file(config, global) {
                    Ok(path) if path.exists() => {
                        println!("{} {}", style("Source:").dim(), path.display());
                    }
                    _ => println!("{}", style("Source: built-in defaults").dim()),
                }
            }
        }
    }

    Ok(())
}

fn print_table(thresholds: &ThresholdConfig) {
    println!(
        "{:<14} {:>10} {:>10} {:>14}",
        style("PARAMETER").bold(),
        style("MIN").bold(),
        style("MAX").bold(),
        style("CRITICAL MAX").bold()
    );
    println!("{}", "-".repeat(51));
    for p in Parameter::ALL {
        let l = thresholds.limits(p);
        println!(
            "{:<14} {:>10} {:>10} {:>14}",
            p.label(),
            style(l.min).green(),
            style(l.max).yellow(),
            style(l.critical_max).red()
        );
    }
}

fn render_markdown(thresholds: &ThresholdConfig) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Parameter", "Min", "Max", "Critical Max"]);
    for p in Parameter::ALL {
        let l = thresholds.limits(p);
        builder.push_record([
            p.label().to_string(),
            l.min.to_string(),
            l.max.to_string(),
            l.critical_max.to_string(),
        ]);
    }

    let mut output = String::from("# Safety Thresholds\n\n");
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');
    output
}

fn run_path(config: &Config, global: &GlobalOpts) -> Result<()> {
    let path = threshold_file(config, global)?;
    if global.quiet {
        println!("{}", path.display());
        return Ok(());
    }

    let status = if path.exists() {
        style("exists").green()
    } else {
        style("not created; built-in defaults apply").dim()
    };
    println!("{} ({})", path.display(), status);

    if let Some(global_path) = Config::global_config_path() {
        println!("{} {}", style("Config file:").dim(), global_path.display());
    }
    Ok(())
}

fn run_init(args: InitArgs, config: &Config, global: &GlobalOpts) -> Result<()> {
    let path = threshold_file(config, global)?;
    if path.exists() && !args.force {
        return Err(miette::miette!(
            "Threshold file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    ThresholdConfig::default().save_to(&path)?;
    println!(
        "{} Wrote default thresholds to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

fn run_set(args: SetArgs, config: &Config, global: &GlobalOpts) -> Result<()> {
    let path = threshold_file(config, global)?;
    let current = ThresholdConfig::load_or_default(&path)?;
    let updated = current.with_field(args.parameter, args.field, args.value);
    updated.save_to(&path)?;

    tracing::debug!(
        parameter = args.parameter.as_str(),
        field = ?args.field,
        value = args.value,
        path = %path.display(),
        "threshold updated"
    );

    println!(
        "{} Set {}.{} {} {}",
        style("✓").green(),
        style(args.parameter.as_str()).cyan(),
        style(field_name(args.field)).cyan(),
        style("→").dim(),
        style(args.value).yellow()
    );

    for issue in updated.ordering_issues() {
        eprintln!("{} {}", style("warning:").yellow().bold(), issue);
    }
    Ok(())
}

fn run_reset(config: &Config, global: &GlobalOpts) -> Result<()> {
    let path = threshold_file(config, global)?;
    ThresholdConfig::default().save_to(&path)?;
    println!(
        "{} Restored default thresholds in {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

fn run_check(config: &Config, global: &GlobalOpts) -> Result<()> {
    let thresholds = config.resolve_thresholds(global.thresholds.as_deref())?;
    let issues = thresholds.ordering_issues();

    if issues.is_empty() {
        if !global.quiet {
            println!("{} Thresholds are consistent", style("✓").green());
        }
        return Ok(());
    }

    for issue in &issues {
        println!("{} {}", style("✗").red(), issue);
    }
    Err(miette::miette!(
        "{} threshold ordering problem(s) found",
        issues.len()
    ))
}

fn field_name(field: LimitField) -> &'static str {
    match field {
        LimitField::Min => "min",
        LimitField::Max => "max",
        LimitField::CriticalMax => "critical_max",
    }
}
