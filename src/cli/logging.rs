//! Diagnostic logging setup for the binary

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug and
/// `--quiet` silences everything below errors.
pub fn init(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "eqa=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be set (e.g. by a test harness); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
