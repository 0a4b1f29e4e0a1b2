//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mr_core::{Config, SplitterKind};
use mr_sql::StatementSplitter;
use std::fmt;

use crate::cli::{GlobalArgs, SplitterArg};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty on purpose: main.rs downcasts this before printing errors
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project configuration from `--config` or the project directory
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display())),
        None => Config::load_from_dir(&global.project_dir)
            .context("Failed to load project configuration"),
    }
}

/// Build the statement splitter, letting a CLI flag override the config
pub(crate) fn build_splitter(
    config: &Config,
    override_kind: Option<SplitterArg>,
) -> Result<StatementSplitter> {
    let kind = override_kind.map(SplitterKind::from).unwrap_or(config.splitter);
    match kind {
        SplitterKind::Naive => Ok(StatementSplitter::naive()),
        SplitterKind::Tokenizer => StatementSplitter::tokenizer(&config.dialect.to_string())
            .context("Failed to create tokenizer splitter"),
    }
}

/// Horizontal rule used around section headers
pub(crate) fn rule() -> String {
    "=".repeat(60)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
