//! `eqa demo` command - Generate synthetic equipment datasets
//!
//! Each kind exercises one part of the analysis: in-range readings, safety
//! alerts, a strong pressure/temperature correlation, or a pair of
//! statistical outliers in otherwise tight data.

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;

use crate::analysis::stats::round_to;
use crate::cli::GlobalOpts;
use crate::core::{EquipmentRecord, Parameter};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    /// Readings inside the default safe ranges
    Normal,
    /// Readings above warning and critical limits
    Critical,
    /// Pressure tracking temperature linearly
    Correlated,
    /// Tight readings with two far-off values
    Outliers,
}

impl DemoKind {
    fn default_count(self) -> usize {
        match self {
            DemoKind::Normal | DemoKind::Outliers => 50,
            DemoKind::Critical => 30,
            DemoKind::Correlated => 100,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct DemoArgs {
    /// Kind of dataset to generate
    #[arg(value_enum)]
    pub kind: DemoKind,

    /// Number of records (defaults depend on the kind)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: DemoArgs, global: &GlobalOpts) -> Result<()> {
    let count = args.count.unwrap_or_else(|| args.kind.default_count());
    let records = match args.seed {
        Some(seed) => generate(args.kind, count, &mut StdRng::seed_from_u64(seed)),
        None => generate(args.kind, count, &mut rand::rng()),
    };
    tracing::debug!(kind = ?args.kind, count, "generated demo dataset");

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).into_diagnostic()?;
            write_csv(&records, file)?;
            if !global.quiet {
                eprintln!(
                    "{} Wrote {} record(s) to {}",
                    style("✓").green(),
                    style(records.len()).cyan(),
                    style(path.display()).yellow()
                );
            }
        }
        None => write_csv(&records, std::io::stdout().lock())?,
    }
    Ok(())
}

/// Write records using the loader's column layout
pub fn write_csv<W: Write>(records: &[EquipmentRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Equipment Name", "Type"];
    header.extend(Parameter::ALL.iter().map(|p| p.label()));
    wtr.write_record(&header).into_diagnostic()?;

    for r in records {
        wtr.write_record([
            r.name.clone(),
            r.category.clone(),
            r.flowrate.to_string(),
            r.pressure.to_string(),
            r.temperature.to_string(),
        ])
        .into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}

/// Generate `count` records of the given kind
pub fn generate<R: Rng + ?Sized>(kind: DemoKind, count: usize, rng: &mut R) -> Vec<EquipmentRecord> {
    match kind {
        DemoKind::Normal => {
            let types = ["Pump", "Heat Exchanger", "Reactor", "Tank", "Compressor"];
            (1..=count)
                .map(|i| {
                    EquipmentRecord::new(
                        format!("EQ-{:03}", i),
                        pick(&types, rng),
                        uniform(rng, 100.0, 450.0),
                        uniform(rng, 200.0, 700.0),
                        uniform(rng, 100.0, 300.0),
                    )
                })
                .collect()
        }
        DemoKind::Critical => {
            let types = ["Reactor", "Compressor"];
            (1..=count)
                .map(|i| {
                    EquipmentRecord::new(
                        format!("CRIT-{:03}", i),
                        pick(&types, rng),
                        uniform(rng, 550.0, 750.0),
                        uniform(rng, 900.0, 1200.0),
                        uniform(rng, 380.0, 450.0),
                    )
                })
                .collect()
        }
        DemoKind::Correlated => (0..count)
            .map(|i| {
                // Temperature sweeps 100..=300 evenly; pressure follows at 2.5x plus noise
                let t = if count > 1 {
                    100.0 + 200.0 * i as f64 / (count - 1) as f64
                } else {
                    100.0
                };
                EquipmentRecord::new(
                    format!("HE-{:03}", i + 1),
                    "Heat Exchanger",
                    uniform(rng, 200.0, 300.0),
                    round_to(t * 2.5 + gaussian(rng, 0.0, 10.0), 1),
                    round_to(t, 1),
                )
            })
            .collect(),
        DemoKind::Outliers => {
            let mut records: Vec<EquipmentRecord> = (1..=count)
                .map(|i| {
                    EquipmentRecord::new(
                        format!("PUMP-{:03}", i),
                        "Pump",
                        round_to(gaussian(rng, 200.0, 5.0), 1),
                        round_to(gaussian(rng, 400.0, 10.0), 1),
                        round_to(gaussian(rng, 150.0, 5.0), 1),
                    )
                })
                .collect();
            if let Some(last) = records.last_mut() {
                last.flowrate = 600.0;
            }
            if count >= 2 {
                records[count - 2].pressure = 50.0;
            }
            records
        }
    }
}

fn pick<R: Rng + ?Sized>(types: &[&str], rng: &mut R) -> String {
    types[rng.random_range(0..types.len())].to_string()
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    round_to(rng.random_range(low..high), 1)
}

/// Normal sample via the Box-Muller transform
fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}
