//! Run command implementation
//!
//! Applies the schema file (when present) and then every migration in file
//! name order. The exit status only reflects file-level failures: with the
//! default `on_statement_error: continue`, a file whose statements all
//! failed still counts as successful.

use anyhow::{anyhow, Context, Result};
use mr_core::config::validate_url;
use mr_core::{Config, MigrationFile, MigrationLayout, StatementErrorMode};
use mr_db::{RpcBackend, RpcConfig, ServiceKey, SqlEndpoint, StatementExecutor, StatementOutcome};
use mr_run::{plan_file, FileReport, FileStatus, MigrationRunner, RunProgress, RunSummary};
use mr_sql::StatementSplitter;
use std::time::Duration;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{build_splitter, load_config, rule, ExitCode};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    apply_overrides(&mut config, args);

    let layout = MigrationLayout::resolve(&global.project_dir, &config)?;
    let splitter = build_splitter(&config, args.splitter)?;
    let migrations = layout.migrations()?;
    let schema = layout.schema();

    if args.dry_run {
        print_dry_run(schema.as_ref(), &migrations, &splitter);
        return Ok(());
    }

    let endpoint = connect(args, &config)?;

    println!("Starting database migrations");
    println!("Endpoint: {}", endpoint.target());
    println!(
        "Policy: {}, splitter: {}",
        config.response_policy,
        splitter.mode_name()
    );
    if let Some(file) = &schema {
        println!("Running {} first", file.name);
    }
    if !migrations.is_empty() {
        println!("Found {} migration files", migrations.len());
    }

    let executor = StatementExecutor::new(
        &endpoint,
        config.response_policy,
        config.tolerated_errors.clone(),
    );
    let progress = ConsoleProgress;
    let runner = MigrationRunner::new(&splitter, &executor, config.on_statement_error, &progress);

    let summary = runner.run_all(schema.as_ref(), &migrations).await;

    if migrations.is_empty() {
        println!(
            "\nNo migration files found in {}",
            layout.migrations_dir.display()
        );
        return Ok(());
    }

    print_summary(&summary, config.on_statement_error);

    if !summary.all_succeeded() {
        return Err(ExitCode(summary.exit_code()).into());
    }

    Ok(())
}

/// Fold command-line overrides into the loaded configuration
fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(policy) = args.policy {
        config.response_policy = policy.into();
    }
    if let Some(splitter) = args.splitter {
        config.splitter = splitter.into();
    }
    if args.abort_file_on_error {
        config.on_statement_error = StatementErrorMode::AbortFile;
    }
}

/// Build the HTTP backend from flags, environment and config
fn connect(args: &RunArgs, config: &Config) -> Result<RpcBackend> {
    let base_url = args
        .url
        .clone()
        .or_else(|| config.url.clone())
        .ok_or_else(|| {
            anyhow!("No endpoint URL: pass --url, set MIGRUN_URL, or set `url` in migrun.yml")
        })?;
    validate_url(&base_url)?;

    let service_key = args
        .service_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| anyhow!("No service key: pass --service-key or set MIGRUN_SERVICE_KEY"))?;

    RpcBackend::new(&RpcConfig {
        base_url,
        rpc_path: config.rpc_path.clone(),
        service_key: ServiceKey::new(service_key),
        timeout: Duration::from_secs(config.timeout_secs),
    })
    .context("Failed to create RPC client")
}

/// Console output for a run in progress
struct ConsoleProgress;

impl RunProgress for ConsoleProgress {
    fn file_started(&self, file: &MigrationFile, statements: usize) {
        println!("\n{}", rule());
        println!("Running: {} ({} statements)", file.name, statements);
        println!("{}", rule());
    }

    fn statement_finished(&self, description: &str, outcome: &StatementOutcome) {
        match outcome {
            StatementOutcome::Applied { .. } => println!("  \u{2713} {}", description),
            StatementOutcome::Tolerated { status, .. } => {
                println!("  ! {} (status {}, tolerated)", description, status)
            }
            StatementOutcome::Rejected { status, .. } => {
                println!("  \u{2717} {} (status {})", description, status)
            }
            StatementOutcome::Failed { error } => {
                println!("  \u{2717} {} - {}", description, error)
            }
        }
    }

    fn file_finished(&self, report: &FileReport) {
        match &report.status {
            FileStatus::Succeeded => println!(
                "Completed: {} ({}/{} statements) [{}ms]",
                report.name,
                report.successful_statements(),
                report.total,
                report.duration.as_millis()
            ),
            FileStatus::Failed { reason } => {
                println!("\u{2717} Failed: {} - {}", report.name, reason)
            }
        }
    }
}

fn print_summary(summary: &RunSummary, on_statement_error: StatementErrorMode) {
    println!("\n{}", rule());
    println!("Migration Summary:");
    println!("  \u{2713} Successful: {}", summary.succeeded);
    println!("  \u{2717} Failed: {}", summary.failed);
    println!("{}\n", rule());

    let failed_statements = summary.failed_statements();
    if failed_statements > 0 && on_statement_error == StatementErrorMode::Continue {
        println!(
            "Note: {} statement{} failed without failing {} file. Use --abort-file-on-error to count them.",
            failed_statements,
            if failed_statements == 1 { "" } else { "s" },
            if failed_statements == 1 { "its" } else { "their" }
        );
    }

    if summary.all_succeeded() {
        println!(
            "All migrations completed successfully in {:.2}s",
            summary.duration.as_secs_f64()
        );
    } else {
        println!("Some migrations failed. Please check the errors above.");
    }
}

fn print_dry_run(
    schema: Option<&MigrationFile>,
    migrations: &[MigrationFile],
    splitter: &StatementSplitter,
) {
    println!("Dry run - no statements will be sent");

    for file in schema.into_iter().chain(migrations.iter()) {
        let plan = plan_file(file, splitter);
        println!("\n{}", rule());
        println!("{}", file.name);
        println!("{}", rule());
        match &plan.statements {
            Ok(statements) => {
                for statement in statements {
                    println!(
                        "-- [{}/{}]\n{};",
                        statement.index,
                        statements.len(),
                        statement.sql
                    );
                }
            }
            Err(e) => println!("\u{2717} {}", e),
        }
    }

    if migrations.is_empty() {
        println!("\nNo migration files found");
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
