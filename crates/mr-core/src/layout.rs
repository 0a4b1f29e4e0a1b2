//! Fixed project layout: one optional schema file and a migrations directory

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::migration::{discover_migrations, MigrationFile};
use std::path::{Path, PathBuf};

/// Resolved locations of the SQL sources of a project
#[derive(Debug, Clone)]
pub struct MigrationLayout {
    /// Project root the other paths were derived from
    pub root: PathBuf,

    /// Baseline schema file (may not exist)
    pub schema_file: PathBuf,

    /// Directory holding the incremental migrations
    pub migrations_dir: PathBuf,
}

impl MigrationLayout {
    /// Derive the layout from a project root.
    ///
    /// Fails when the migrations directory is missing. A missing schema
    /// file is not an error.
    pub fn resolve(root: &Path, config: &Config) -> CoreResult<Self> {
        let migrations_dir = config.migrations_dir_absolute(root);
        if !migrations_dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: migrations_dir.display().to_string(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            schema_file: config.schema_file_absolute(root),
            migrations_dir,
        })
    }

    /// The schema file, if present on disk
    pub fn schema(&self) -> Option<MigrationFile> {
        if self.schema_file.exists() {
            Some(MigrationFile::new(&self.schema_file))
        } else {
            None
        }
    }

    /// Migration files in execution order
    pub fn migrations(&self) -> CoreResult<Vec<MigrationFile>> {
        discover_migrations(&self.migrations_dir)
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
