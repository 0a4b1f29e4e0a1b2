//! mr-run - Migration runner for Migrun
//!
//! This crate applies the schema file and the ordered migration files
//! through a `StatementExecutor`, keeps the per-file counters, and builds
//! the run summary that decides the process exit status.

pub mod plan;
pub mod progress;
pub mod runner;

pub use plan::{plan_file, FilePlan};
pub use progress::{RunProgress, SilentProgress};
pub use runner::{FileReport, FileStatus, MigrationRunner, RunSummary};
