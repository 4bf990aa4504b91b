//! Implementation of `rad ref`.

use std::process::ExitCode;

use crate::cli::{args::RefCommand, context::CommandContext, output::output_entries};

/// Looks up entries by reference code.
pub fn run(ctx: &CommandContext, cmd: &RefCommand) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    output_entries(&resolver.search_by_reference(&cmd.code), cmd.output.json)
}
