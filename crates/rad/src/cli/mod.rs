//! CLI support for the `rad` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
