//! CLI argument definitions for the email-map administration tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "emap",
    version,
    about = "Administer email-header to record-property mappings",
    long_about = "Inspect and edit the email-header to record-property mappings of a\n\
                  records-management server. Changes are staged locally against the\n\
                  server's mapping set and submitted as a single batched request."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the records-management server, e.g. https://host/service.
    #[arg(long = "server", value_name = "URL", global = true)]
    pub server: Option<String>,

    /// User name for HTTP basic authentication.
    #[arg(short = 'u', long = "user", value_name = "NAME", global = true)]
    pub user: Option<String>,

    /// Password for HTTP basic authentication.
    #[arg(short = 'p', long = "password", value_name = "PASSWORD", global = true)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        default_value_t = 30,
        global = true
    )]
    pub timeout_secs: u64,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all mappings currently configured on the server.
    List,

    /// Show the record properties mapped from one email header.
    Show(ShowArgs),

    /// Check whether a pair could be added without conflicting.
    Check(PairArgs),

    /// Add mappings and submit them in one batched request.
    Add(PairsArgs),

    /// Remove mappings and submit the deletions in one batched request.
    Remove(PairsArgs),

    /// Apply a JSON plan of additions and removals as one batch.
    Apply(ApplyArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Email header to look up.
    #[arg(value_name = "HEADER")]
    pub from: String,
}

#[derive(Parser)]
pub struct PairArgs {
    /// Mapping written as header=property.
    #[arg(value_name = "PAIR")]
    pub pair: String,
}

#[derive(Parser)]
pub struct PairsArgs {
    /// Mappings written as header=property.
    #[arg(value_name = "PAIR", required = true)]
    pub pairs: Vec<String>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to the JSON plan file.
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,

    /// Stage and validate the plan without submitting anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
