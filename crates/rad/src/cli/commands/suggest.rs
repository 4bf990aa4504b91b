//! Implementation of `rad suggest`.

use std::process::ExitCode;

use crate::cli::{
    args::SuggestCommand,
    context::CommandContext,
    output::{dim, print_json},
};

/// Prints identifiers of the best matches for a partial query.
pub fn run(ctx: &CommandContext, cmd: &SuggestCommand) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let suggestions = resolver.get_suggestions(&cmd.partial, cmd.limit);
    if cmd.output.json {
        return print_json(&suggestions);
    }

    if suggestions.is_empty() {
        println!("{}", dim("No suggestions."));
    }
    for id in suggestions {
        println!("{id}");
    }
    ExitCode::SUCCESS
}
