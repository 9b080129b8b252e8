//! Tether - resolve deployment secrets with a local fallback.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tether::cli::output;
use tether::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // TETHER_LOG wins over --verbose
    let filter = EnvFilter::try_from_env("TETHER_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("tether=debug")
        } else {
            EnvFilter::new("tether=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(keys) = e.missing_keys() {
            for key in keys {
                output::list_item(key);
            }
        }
        if let Some(hint) = e.hint() {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
