//! Command-line interface for `rad`, the RAD restriction lookup tool.

mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{args::Cli, commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    commands::run(cli.command, cli.data)
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}
