//! Clap argument definitions for the `rad` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "rad")]
#[command(about = "Find the RAD restriction behind a flight plan rejection")]
pub struct Cli {
    /// Dataset document to load, overriding the configured path
    #[arg(long, global = true, env = "RAD_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Log verbosity (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `rad search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search terms, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Only entries in this annex (exact, e.g. 2B)
    #[arg(long)]
    pub annex: Option<String>,

    /// Only entries whose NAS/FAB contains this code
    #[arg(long)]
    pub nas_fab: Option<String>,

    /// Only entries with this change indicator (NEW, AMD, DEL, SUS)
    #[arg(long)]
    pub status: Option<String>,

    /// Maximum results [default: `search.limit` from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rad ref`.
#[derive(Args, Debug, Clone)]
pub struct RefCommand {
    /// Reference code, with or without brackets, e.g. [LSLF1139C]
    pub code: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rad error`.
#[derive(Args, Debug, Clone)]
pub struct ErrorCommand {
    /// Error message text, joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,

    /// Print the extracted hints and lookup strategy before the results
    #[arg(long)]
    pub explain: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rad parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Error message text, joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rad suggest`.
#[derive(Args, Debug, Clone)]
pub struct SuggestCommand {
    /// Partial identifier or text
    pub partial: String,

    /// Maximum suggestions [default: `search.suggestion_limit` from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rad get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Entry identifier, case-insensitive
    pub id: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rad annex`.
#[derive(Args, Debug, Clone)]
pub struct AnnexCommand {
    /// Annex tag, e.g. 2B
    pub annex: String,

    /// Search within the annex instead of listing it
    pub query: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Supported `rad` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fuzzy search across entries
    #[command(after_help = "\
EXAMPLES:
  rad search OMASI
  rad search UN869 --annex 2B
  rad search LSZH --nas-fab LS --status NEW -n 10")]
    Search(SearchCommand),

    /// Look up an entry by reference code
    Ref(RefCommand),

    /// Find the entries behind a flight plan error message
    #[command(after_help = "\
LOOKUP ORDER:
  1. REF:[CODE] in the message, if it names an entry
  2. Five-letter points mentioned, within the mentioned annex
  3. Full-text search over the whole message

EXAMPLES:
  rad error 'RS: TRAFFIC VIA OMASI IS ON FORBIDDEN ROUTE REF:[LSLF1139C] ANNEX 2B'
  rad error --explain 'ROUTE NOT AVAILABLE VIA GERSA'")]
    Error(ErrorCommand),

    /// Show the hints extracted from an error message
    Parse(ParseCommand),

    /// Suggest entry identifiers for a partial query
    Suggest(SuggestCommand),

    /// Print one entry by identifier
    Get(GetCommand),

    /// List or search the entries of one annex
    Annex(AnnexCommand),

    /// Show entry counts by annex, jurisdiction and status
    Stats(OutputArgs),

    /// Show dataset metadata
    Info(OutputArgs),

    /// Show effective configuration settings
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_collects_filters() {
        let cli = Cli::try_parse_from([
            "rad", "search", "UN869", "OMASI", "--annex", "2B", "--status", "new", "-n", "3",
        ])
        .unwrap();
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(cmd.query, ["UN869", "OMASI"]);
        assert_eq!(cmd.annex.as_deref(), Some("2B"));
        assert_eq!(cmd.status.as_deref(), Some("new"));
        assert_eq!(cmd.limit, Some(3));
        assert!(!cmd.output.json);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["rad", "stats", "--data", "x.json", "-vv", "--json"])
            .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.json")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Stats(OutputArgs { json: true })));
    }

    #[test]
    fn annex_query_is_optional() {
        let cli = Cli::try_parse_from(["rad", "annex", "3B"]).unwrap();
        let Commands::Annex(cmd) = cli.command else {
            panic!("expected annex");
        };
        assert_eq!(cmd.annex, "3B");
        assert!(cmd.query.is_empty());
    }
}
