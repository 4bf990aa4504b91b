//! Command implementations and dispatch.

pub mod annex;
pub mod config;
pub mod error;
pub mod get;
pub mod info;
pub mod parse;
pub mod reference;
pub mod search;
pub mod stats;
pub mod suggest;

use std::{path::PathBuf, process::ExitCode};

use super::{args::Commands, context::CommandContext};

/// Runs the selected subcommand.
///
/// `parse` works on its argument alone, so configuration is only loaded for the others.
pub fn run(command: Commands, data_override: Option<PathBuf>) -> ExitCode {
    match command {
        Commands::Parse(cmd) => parse::run(&cmd),
        command => match CommandContext::load(data_override) {
            Ok(ctx) => dispatch(command, &ctx),
            Err(code) => code,
        },
    }
}

/// Dispatches a subcommand that uses the loaded context.
fn dispatch(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Ref(cmd) => reference::run(ctx, &cmd),
        Commands::Error(cmd) => error::run(ctx, &cmd),
        Commands::Parse(cmd) => parse::run(&cmd),
        Commands::Suggest(cmd) => suggest::run(ctx, &cmd),
        Commands::Get(cmd) => get::run(ctx, &cmd),
        Commands::Annex(cmd) => annex::run(ctx, &cmd),
        Commands::Stats(output) => stats::run(ctx, output),
        Commands::Info(output) => info::run(ctx, output),
        Commands::Config => config::run(ctx),
    }
}
