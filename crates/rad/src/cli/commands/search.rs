//! Implementation of `rad search`.

use std::process::ExitCode;

use rad_index::SearchOptions;

use crate::cli::{args::SearchCommand, context::CommandContext, output::output_scored};

/// Searches entries with optional filters and prints the matches.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let query = cmd.query.join(" ");
    let options = SearchOptions {
        annex: cmd.annex.clone(),
        nas_fab: cmd.nas_fab.clone(),
        change_status: cmd.status.clone(),
        limit: cmd.limit,
    };

    let results = resolver.search(&query, &options);
    output_scored(&results, &query, cmd.output.json)
}
