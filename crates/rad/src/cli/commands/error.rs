//! Implementation of `rad error`.

use std::process::ExitCode;

use rad_index::LookupStrategy;

use crate::cli::{
    args::ErrorCommand,
    context::CommandContext,
    output::{dim, output_scored, print_hint, print_json, subheader},
};

/// Finds the entries an error message refers to.
pub fn run(ctx: &CommandContext, cmd: &ErrorCommand) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let message = cmd.message.join(" ");
    let lookup = resolver.resolve_error(&message);

    if cmd.output.json {
        return print_json(&lookup);
    }

    if cmd.explain {
        print_hint(&lookup.hint);
        println!(
            "{} {}",
            subheader("Lookup:"),
            describe_strategy(lookup.strategy, lookup.hint.annex.as_deref())
        );
        println!();
    } else if lookup.strategy == LookupStrategy::Reference {
        println!("{}", dim("Matched reference code."));
    }

    output_scored(&lookup.results, &message, false)
}

/// One-line description of how results were found.
fn describe_strategy(strategy: LookupStrategy, annex: Option<&str>) -> String {
    match (strategy, annex) {
        (LookupStrategy::Reference, _) => "reference code".to_string(),
        (LookupStrategy::Points, Some(annex)) => format!("mentioned points in annex {annex}"),
        (LookupStrategy::Points, None) => "mentioned points".to_string(),
        (LookupStrategy::FullText, _) => "full-text search".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_descriptions_name_the_annex() {
        assert_eq!(
            describe_strategy(LookupStrategy::Points, Some("2B")),
            "mentioned points in annex 2B"
        );
        assert_eq!(
            describe_strategy(LookupStrategy::FullText, Some("2B")),
            "full-text search"
        );
    }
}
