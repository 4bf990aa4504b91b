//! Implementation of `rad config`.

use std::process::ExitCode;

use rad_highlight::Highlighter;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader},
};

/// Shows the dataset path in effect and the effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let toml = match config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: failed to render settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    match &config.config_root {
        Some(root) => println!("{} {}", subheader("Config root:"), root.display()),
        None => println!("{}", dim("No configuration files found; using defaults.")),
    }
    if let Ok(path) = ctx.dataset_path() {
        println!("{} {}", subheader("Dataset:"), path.display());
    }
    println!();

    let highlighter = Highlighter::new();
    print!("{}", highlighter.highlight_toml(&toml));
    ExitCode::SUCCESS
}
