//! Implementation of `rad get`.

use std::process::ExitCode;

use crate::cli::{args::GetCommand, context::CommandContext, output::print_json};

/// Prints entries by identifier in plain text for copying into a briefing.
pub fn run(ctx: &CommandContext, cmd: &GetCommand) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let entries = resolver.search_by_id(&cmd.id);
    if entries.is_empty() {
        eprintln!("error: not found: {}", cmd.id);
        return ExitCode::FAILURE;
    }

    if cmd.output.json {
        return print_json(&entries);
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{entry}");
    }
    ExitCode::SUCCESS
}
