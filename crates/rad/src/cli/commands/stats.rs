//! Implementation of `rad stats`.

use std::{collections::BTreeMap, process::ExitCode};

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{
    args::OutputArgs,
    context::CommandContext,
    output::{print_json, subheader},
};

/// Prints entry counts by annex, jurisdiction and status.
pub fn run(ctx: &CommandContext, output: OutputArgs) -> ExitCode {
    let resolver = match ctx.resolver() {
        Ok(r) => r,
        Err(code) => return code,
    };

    let stats = resolver.get_stats();
    if output.json {
        return print_json(&stats);
    }

    println!("{} {}", subheader("Total entries:"), stats.total);
    println!();
    print_counts("By annex:", "Annex", &stats.by_annex);
    print_counts("By status:", "Status", &stats.by_status);
    print_counts("By jurisdiction:", "NAS/FAB", &stats.by_country);
    ExitCode::SUCCESS
}

/// Prints one count table, largest bucket first.
fn print_counts(title: &str, column: &str, counts: &BTreeMap<String, usize>) {
    println!("{}", subheader(title));
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![column, "Entries"]);

    for (key, count) in sorted_counts(counts) {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    println!();
}

/// Buckets ordered by descending count, then key.
fn sorted_counts(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut sorted: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}
