//! Migration execution

use crate::plan::plan_file;
use crate::progress::RunProgress;
use mr_core::{MigrationFile, StatementErrorMode};
use mr_db::{StatementExecutor, StatementOutcome};
use mr_sql::StatementSplitter;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Final state of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was read and its statements attempted
    Succeeded,
    /// The file could not be read or split, or was aborted
    Failed { reason: String },
}

/// Result of running one file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// File name
    pub name: String,

    /// Full path
    pub path: PathBuf,

    /// Statements found in the file
    pub total: usize,

    /// Statements answered with 200/201/204
    pub applied: usize,

    /// Statements rejected remotely but passed by the policy
    pub tolerated: usize,

    /// Statements rejected by the policy or lost to transport errors
    pub failed: usize,

    /// File-level outcome
    pub status: FileStatus,

    /// Execution time
    pub duration: Duration,
}

impl FileReport {
    fn new(file: &MigrationFile) -> Self {
        Self {
            name: file.name.clone(),
            path: file.path.clone(),
            total: 0,
            applied: 0,
            tolerated: 0,
            failed: 0,
            status: FileStatus::Succeeded,
            duration: Duration::ZERO,
        }
    }

    /// Whether the file counts as successful
    pub fn succeeded(&self) -> bool {
        self.status == FileStatus::Succeeded
    }

    /// Statements that counted as successful
    pub fn successful_statements(&self) -> usize {
        self.applied + self.tolerated
    }

    /// Statements that were sent
    pub fn attempted(&self) -> usize {
        self.applied + self.tolerated + self.failed
    }

    fn record(&mut self, outcome: &StatementOutcome) {
        match outcome {
            StatementOutcome::Applied { .. } => self.applied += 1,
            StatementOutcome::Tolerated { .. } => self.tolerated += 1,
            StatementOutcome::Rejected { .. } | StatementOutcome::Failed { .. } => {
                self.failed += 1
            }
        }
    }
}

/// Summary of a run
///
/// Only migration files are counted. The schema file is reported but does
/// not affect the counters or the exit status.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Schema file report, when a schema file exists
    pub schema: Option<FileReport>,

    /// Migration file reports in execution order
    pub files: Vec<FileReport>,

    /// Migration files that succeeded
    pub succeeded: usize,

    /// Migration files that failed
    pub failed: usize,

    /// Total execution time
    pub duration: Duration,
}

impl RunSummary {
    /// Create a summary from file reports
    pub fn from_reports(
        schema: Option<FileReport>,
        files: Vec<FileReport>,
        duration: Duration,
    ) -> Self {
        let succeeded = files.iter().filter(|r| r.succeeded()).count();
        let failed = files.len() - succeeded;

        Self {
            schema,
            files,
            succeeded,
            failed,
            duration,
        }
    }

    /// Check that no migration file failed
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }

    /// Statements that failed across every file, schema included.
    ///
    /// A non-zero value with `all_succeeded()` is possible: statement
    /// failures do not fail their file unless the run aborts files.
    pub fn failed_statements(&self) -> usize {
        self.schema
            .iter()
            .chain(self.files.iter())
            .map(|r| r.failed)
            .sum()
    }
}

/// Runner applying SQL files statement by statement
pub struct MigrationRunner<'a> {
    splitter: &'a StatementSplitter,
    executor: &'a StatementExecutor<'a>,
    on_statement_error: StatementErrorMode,
    progress: &'a dyn RunProgress,
}

impl<'a> MigrationRunner<'a> {
    /// Create a new runner
    pub fn new(
        splitter: &'a StatementSplitter,
        executor: &'a StatementExecutor<'a>,
        on_statement_error: StatementErrorMode,
        progress: &'a dyn RunProgress,
    ) -> Self {
        Self {
            splitter,
            executor,
            on_statement_error,
            progress,
        }
    }

    /// Run a single file.
    ///
    /// Every statement is attempted unless the runner aborts files on the
    /// first failing statement.
    pub async fn run_file(&self, file: &MigrationFile) -> FileReport {
        let start = Instant::now();
        let mut report = FileReport::new(file);

        let statements = match plan_file(file, self.splitter).statements {
            Ok(statements) => statements,
            Err(reason) => {
                log::error!("Failed to read {}: {}", file.name, reason);
                report.status = FileStatus::Failed { reason };
                report.duration = start.elapsed();
                self.progress.file_finished(&report);
                return report;
            }
        };

        report.total = statements.len();
        self.progress.file_started(file, report.total);

        for statement in &statements {
            let description = format!(
                "{} - Statement {}/{}",
                file.name, statement.index, report.total
            );
            self.progress.statement_started(&description);

            let outcome = self.executor.execute(&statement.sql, &description).await;
            report.record(&outcome);
            self.progress.statement_finished(&description, &outcome);

            if !outcome.is_success() && self.on_statement_error == StatementErrorMode::AbortFile {
                report.status = FileStatus::Failed {
                    reason: format!(
                        "statement {}/{} failed, {} statements skipped",
                        statement.index,
                        report.total,
                        report.total - statement.index
                    ),
                };
                break;
            }
        }

        report.duration = start.elapsed();
        self.progress.file_finished(&report);
        report
    }

    /// Run the schema file (if any), then every migration file in order
    pub async fn run_all(
        &self,
        schema: Option<&MigrationFile>,
        migrations: &[MigrationFile],
    ) -> RunSummary {
        let start = Instant::now();

        let schema_report = match schema {
            Some(file) => Some(self.run_file(file).await),
            None => None,
        };

        let mut reports = Vec::with_capacity(migrations.len());
        for file in migrations {
            reports.push(self.run_file(file).await);
        }

        RunSummary::from_reports(schema_report, reports, start.elapsed())
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
