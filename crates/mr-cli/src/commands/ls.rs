//! List command implementation

use anyhow::{Context, Result};
use mr_core::MigrationLayout;
use mr_run::plan_file;
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::{build_splitter, load_config, ExitCode};

/// One row of the listing
#[derive(Debug, Serialize)]
struct FileInfo {
    order: usize,
    name: String,
    kind: &'static str,
    path: String,
    statements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let layout = MigrationLayout::resolve(&global.project_dir, &config)?;
    let splitter = build_splitter(&config, args.splitter)?;

    let files = collect_files(&layout, &splitter)?;

    match args.output {
        LsOutput::Table => print_table(&files),
        LsOutput::Json => print_json(&files)?,
    }

    if files.iter().any(|f| f.error.is_some()) {
        return Err(ExitCode(1).into());
    }

    Ok(())
}

/// Schema file first, then migrations in execution order
fn collect_files(
    layout: &MigrationLayout,
    splitter: &mr_sql::StatementSplitter,
) -> Result<Vec<FileInfo>> {
    let schema = layout.schema();
    let migrations = layout.migrations()?;

    let entries = schema
        .iter()
        .map(|f| (f, "schema"))
        .chain(migrations.iter().map(|f| (f, "migration")));

    Ok(entries
        .enumerate()
        .map(|(i, (file, kind))| {
            let plan = plan_file(file, splitter);
            FileInfo {
                order: i + 1,
                name: file.name.clone(),
                kind,
                path: file.path.display().to_string(),
                statements: plan.statement_count(),
                error: plan.statements.err(),
            }
        })
        .collect())
}

/// Print files in table format
fn print_table(files: &[FileInfo]) {
    if files.is_empty() {
        println!("No SQL files found.");
        return;
    }

    let name_width = files
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let kind_width = 9;

    println!(
        "{:>5}  {:<name_width$}  {:<kind_width$}  {:>10}  STATUS",
        "ORDER",
        "NAME",
        "KIND",
        "STATEMENTS",
        name_width = name_width,
        kind_width = kind_width
    );
    println!(
        "{}",
        "-".repeat(5 + 2 + name_width + 2 + kind_width + 2 + 10 + 2 + 6)
    );

    for file in files {
        let status = match &file.error {
            Some(e) => format!("\u{2717} {}", e),
            None => "ok".to_string(),
        };
        println!(
            "{:>5}  {:<name_width$}  {:<kind_width$}  {:>10}  {}",
            file.order,
            file.name,
            file.kind,
            file.statements,
            status,
            name_width = name_width,
            kind_width = kind_width
        );
    }

    let total: usize = files.iter().map(|f| f.statements).sum();
    println!("\n{} files, {} statements", files.len(), total);
}

/// Print files as JSON
fn print_json(files: &[FileInfo]) -> Result<()> {
    let json = serde_json::to_string_pretty(files).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "ls_test.rs"]
mod tests;
