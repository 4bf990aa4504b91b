//! Implementation of `rad info`.

use std::process::ExitCode;

use serde::Serialize;
use serde_json::Value;

use crate::cli::{
    args::OutputArgs,
    context::CommandContext,
    output::{dim, print_json, subheader},
};

/// JSON output for `rad info`.
#[derive(Serialize)]
struct JsonInfo<'a> {
    /// Dataset file the index was built from.
    path: String,
    /// Number of indexed entries.
    entries: usize,
    /// Metadata as loaded.
    metadata: &'a rad_index::Metadata,
}

/// Prints dataset metadata.
pub fn run(ctx: &CommandContext, output: OutputArgs) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };
    let path = match ctx.dataset_path() {
        Ok(p) => p.display().to_string(),
        Err(code) => return code,
    };
    let metadata = resolver.metadata();

    if output.json {
        return print_json(&JsonInfo {
            path,
            entries: resolver.len(),
            metadata,
        });
    }

    println!("{}", subheader("Dataset:"));
    println!("   {path}");
    println!();
    println!("{}", subheader("Metadata:"));
    print_field("Cycle", metadata.cycle.as_deref());
    print_field("Version", metadata.version.as_deref());
    print_field("Source file", metadata.filename.as_deref());
    print_field("Parsed at", metadata.parsed_at.as_deref());
    for (key, value) in &metadata.extra {
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        print_field(key, Some(&rendered));
    }
    println!();
    println!("{} {}", subheader("Entries:"), resolver.len());
    ExitCode::SUCCESS
}

/// Prints one metadata line, dimming absent values.
fn print_field(label: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("   {label:14}{value}"),
        None => println!("   {label:14}{}", dim("unknown")),
    }
}
