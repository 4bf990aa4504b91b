//! Implementation of `rad annex`.

use std::process::ExitCode;

use crate::cli::{
    args::AnnexCommand,
    context::CommandContext,
    output::{output_entries, output_scored},
};

/// Lists an annex, or searches within it when a query is given.
pub fn run(ctx: &CommandContext, cmd: &AnnexCommand) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    if cmd.query.is_empty() {
        return output_entries(&resolver.get_annex_entries(&cmd.annex), cmd.output.json);
    }

    let query = cmd.query.join(" ");
    let results = resolver.search_in_annex(&cmd.annex, &query);
    output_scored(&results, &query, cmd.output.json)
}
