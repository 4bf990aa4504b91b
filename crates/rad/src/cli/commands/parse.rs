//! Implementation of `rad parse`.

use std::process::ExitCode;

use crate::cli::{
    args::ParseCommand,
    output::{dim, print_hint, print_json},
};

/// Prints the hints extracted from an error message. Needs no dataset.
pub fn run(cmd: &ParseCommand) -> ExitCode {
    let hint = rad_hint::parse(&cmd.message.join(" "));

    if cmd.output.json {
        return print_json(&hint);
    }

    if hint.is_empty() {
        println!("{}", dim("Nothing recognised in this message."));
        return ExitCode::SUCCESS;
    }
    print_hint(&hint);
    ExitCode::SUCCESS
}
