use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Filter structured build diagnostics against rule expressions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Filter expression; repeatable, a record is kept when any matches
    #[arg(short, long = "filter", global = true, value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Path to a TOML profile with default filters and display rules
    #[arg(short, long, global = true, env = "LOG_SIEVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use the fully backtracking wildcard matcher instead of the
    /// historical one-lookahead scan
    #[arg(long, global = true)]
    pub exact_wildcards: bool,

    /// When to colorize text output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter JSON-lines diagnostic records from files or stdin
    Run {
        /// Input files; reads stdin when none are given
        files: Vec<PathBuf>,

        /// Output format for matching records
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write matching records to this file, as plain JSON lines
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print only the number of matching records
        #[arg(long)]
        count: bool,
    },
    /// Compile the configured filters and show the result
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
