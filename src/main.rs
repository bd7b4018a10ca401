//! conformance-runner CLI entry point.
//!
//! Runs every suite under `example-code/` in the current directory. There are
//! no command-line flags; see the library docs for the configuration file and
//! `CONFORMANCE_RUNNER_*` environment variables.

use conformance_runner::config::{ConfigLoader, env};
use std::process::exit;

fn main() {
    let config = match ConfigLoader::new().load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    init_tracing(config.verbose);

    for (key, value) in env::detect_active_overrides() {
        tracing::debug!("{key}={value}");
    }

    match conformance_runner::builder().with_config(config).run() {
        Ok(summary) => exit(summary.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

/// Initialize structured logging on stderr, filtered by `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .try_init();
}
