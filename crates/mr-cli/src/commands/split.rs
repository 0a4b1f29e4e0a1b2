//! Split command implementation

use anyhow::{Context, Result};
use mr_core::MigrationFile;

use crate::cli::{GlobalArgs, SplitArgs};
use crate::commands::common::{build_splitter, load_config};

/// Execute the split command
pub async fn execute(args: &SplitArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let splitter = build_splitter(&config, args.splitter)?;

    let file = MigrationFile::new(&args.file);
    let sql = file.read_sql()?;
    let statements = splitter
        .split(&sql)
        .with_context(|| format!("Failed to split {}", file.name))?;

    println!(
        "-- {}: {} statement{} ({} splitter)",
        file.name,
        statements.len(),
        if statements.len() == 1 { "" } else { "s" },
        splitter.mode_name()
    );
    for statement in &statements {
        println!(
            "\n-- [{}/{}]\n{};",
            statement.index,
            statements.len(),
            statement.sql
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "split_test.rs"]
mod tests;
