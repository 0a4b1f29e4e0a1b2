//! Progress callbacks emitted while a run is in flight

use crate::runner::FileReport;
use mr_core::MigrationFile;
use mr_db::StatementOutcome;

/// Observer of a migration run, called in execution order
pub trait RunProgress: Send + Sync {
    /// A file was read and split
    fn file_started(&self, _file: &MigrationFile, _statements: usize) {}

    /// A statement is about to be sent
    fn statement_started(&self, _description: &str) {}

    /// A statement came back
    fn statement_finished(&self, _description: &str, _outcome: &StatementOutcome) {}

    /// A file is done, successfully or not
    fn file_finished(&self, _report: &FileReport) {}
}

/// Progress observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl RunProgress for SilentProgress {}
