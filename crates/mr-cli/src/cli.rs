//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use mr_core::{ResponsePolicy, SplitterKind};
use std::path::PathBuf;

/// Migrun - apply SQL migrations through an HTTP exec_sql endpoint
#[derive(Parser, Debug)]
#[command(name = "migrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (holds supabase/schema.sql and supabase/migrations)
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the schema file and every migration, in order
    Run(RunArgs),

    /// List the files a run would apply, with statement counts
    Ls(LsArgs),

    /// Print the statements a file splits into
    Split(SplitArgs),
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Base URL of the remote project
    #[arg(long, env = "MIGRUN_URL")]
    pub url: Option<String>,

    /// Service-role key sent as apikey and bearer token
    #[arg(long, env = "MIGRUN_SERVICE_KEY", hide_env_values = true)]
    pub service_key: Option<String>,

    /// Override how non-success HTTP statuses are classified
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Override the statement splitter
    #[arg(long, value_enum)]
    pub splitter: Option<SplitterArg>,

    /// Stop a file at its first failing statement and mark it failed
    #[arg(long)]
    pub abort_file_on_error: bool,

    /// Split and print statements without sending anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,

    /// Override the statement splitter
    #[arg(long, value_enum)]
    pub splitter: Option<SplitterArg>,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// SQL file to split
    pub file: PathBuf,

    /// Override the statement splitter
    #[arg(long, value_enum)]
    pub splitter: Option<SplitterArg>,
}

/// Response policy choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Log rejected statements and count them as applied
    Lenient,
    /// Pass only rejections matching tolerated_errors
    Tolerant,
    /// Fail every rejected statement
    Strict,
}

impl From<PolicyArg> for ResponsePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lenient => ResponsePolicy::Lenient,
            PolicyArg::Tolerant => ResponsePolicy::Tolerant,
            PolicyArg::Strict => ResponsePolicy::Strict,
        }
    }
}

/// Statement splitter choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterArg {
    /// Cut at every ';'
    Naive,
    /// Cut at top-level ';' tokens only
    Tokenizer,
}

impl From<SplitterArg> for SplitterKind {
    fn from(arg: SplitterArg) -> Self {
        match arg {
            SplitterArg::Naive => SplitterKind::Naive,
            SplitterArg::Tokenizer => SplitterKind::Tokenizer,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
