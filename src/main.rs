use clap::Parser;
use miette::Result;
use eqa::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head` causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    eqa::cli::logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::Analyze(args) => eqa::cli::commands::analyze::run(args, &global),
        Commands::Classify(args) => eqa::cli::commands::classify::run(args, &global),
        Commands::Thresholds(cmd) => eqa::cli::commands::thresholds::run(cmd, &global),
        Commands::Template(args) => eqa::cli::commands::template::run(args, &global),
        Commands::Demo(args) => eqa::cli::commands::demo::run(args, &global),
        Commands::Completions(args) => eqa::cli::commands::completions::run(args),
    }
}
