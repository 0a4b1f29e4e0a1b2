//! Migration file discovery

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// A SQL file scheduled for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Full path to the file
    pub path: PathBuf,

    /// File name, used for ordering and progress output
    pub name: String,
}

impl MigrationFile {
    /// Create a reference to a SQL file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    /// Read the full text of the file
    pub fn read_sql(&self) -> CoreResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

/// Find every `*.sql` entry in `dir`, sorted by file name.
///
/// Entries that cannot be inspected are logged and skipped. Matching
/// entries are not opened here, so an unreadable file surfaces later as a
/// failed file rather than being dropped from the run.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    let pattern = format!(
        "{}/*.sql",
        glob::Pattern::escape(&dir.display().to_string())
    );

    let entries = glob::glob(&pattern).map_err(|e| CoreError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    let mut files: Vec<MigrationFile> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => files.push(MigrationFile::new(path)),
            Err(e) => log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
