//! Offline view of a run: files and their statements, no network

use mr_core::MigrationFile;
use mr_sql::{Statement, StatementSplitter};

/// Statements a file would send, or why it cannot be run
#[derive(Debug, Clone)]
pub struct FilePlan {
    /// The planned file
    pub file: MigrationFile,

    /// Split statements, or the read/tokenize error message
    pub statements: Result<Vec<Statement>, String>,
}

impl FilePlan {
    /// Number of statements, zero when the file cannot be run
    pub fn statement_count(&self) -> usize {
        self.statements.as_ref().map_or(0, Vec::len)
    }
}

/// Read and split one file without executing anything
pub fn plan_file(file: &MigrationFile, splitter: &StatementSplitter) -> FilePlan {
    let statements = file
        .read_sql()
        .map_err(|e| e.to_string())
        .and_then(|sql| splitter.split(&sql).map_err(|e| e.to_string()));

    FilePlan {
        file: file.clone(),
        statements,
    }
}
