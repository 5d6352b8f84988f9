//! `eqa template` command - Print the expected CSV layout

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::write_output;
use crate::cli::GlobalOpts;
use crate::core::REQUIRED_COLUMNS;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Header row only, without the example record
    #[arg(long)]
    pub header_only: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

const EXAMPLE_ROW: &str = "Pump A,Pump,100,10,80";

pub fn run(args: TemplateArgs, global: &GlobalOpts) -> Result<()> {
    let content = render(args.header_only);

    if args.output.is_none() && !global.quiet {
        eprintln!(
            "{} Fill in one row per piece of equipment; column order is free and extra columns are ignored",
            style("Tip:").dim()
        );
    }
    write_output(&content, args.output)
}

fn render(header_only: bool) -> String {
    let mut out = REQUIRED_COLUMNS.join(",");
    out.push('\n');
    if !header_only {
        out.push_str(EXAMPLE_ROW);
        out.push('\n');
    }
    out
}
