//! Configuration types and parsing for migrun.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from migrun.yml
///
/// Every field has a default, so a project without a config file runs with
/// the conventional `supabase/schema.sql` + `supabase/migrations` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the remote project (e.g. `https://abc.supabase.co`).
    ///
    /// Overridden by `--url` / `MIGRUN_URL`.
    #[serde(default)]
    pub url: Option<String>,

    /// RPC route appended to `url` that executes one SQL string
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Baseline schema file, relative to the project root
    #[serde(default = "default_schema_file")]
    pub schema_file: String,

    /// Directory holding the `*.sql` migrations, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// How file content is cut into statements
    #[serde(default)]
    pub splitter: SplitterKind,

    /// SQL dialect used by the tokenizer splitter
    #[serde(default)]
    pub dialect: Dialect,

    /// How non-success HTTP statuses are classified
    #[serde(default)]
    pub response_policy: ResponsePolicy,

    /// Response body fragments tolerated by the `tolerant` policy
    #[serde(default = "default_tolerated_errors")]
    pub tolerated_errors: Vec<String>,

    /// What a failing statement does to the rest of its file
    #[serde(default)]
    pub on_statement_error: StatementErrorMode,
}

/// Statement splitting strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitterKind {
    /// Cut at every `;` character
    #[default]
    Naive,
    /// Cut at top-level `;` tokens only
    Tokenizer,
}

/// SQL dialect for the tokenizer splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL (dollar quoting, `E''` strings)
    #[default]
    Postgres,
    /// ANSI-ish generic dialect
    Generic,
}

/// Classification of HTTP statuses outside 200/201/204
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePolicy {
    /// Every rejected statement is logged and counted as applied
    #[default]
    Lenient,
    /// Only rejections whose body matches `tolerated_errors` pass
    Tolerant,
    /// Every rejected statement fails
    Strict,
}

/// Behaviour after a statement fails inside a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatementErrorMode {
    /// Attempt the remaining statements; the file still succeeds
    #[default]
    Continue,
    /// Stop the file at the first failure and mark it failed
    AbortFile,
}

const DEFAULT_RPC_PATH: &str = "/rest/v1/rpc/exec_sql";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_rpc_path() -> String {
    DEFAULT_RPC_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_schema_file() -> String {
    "supabase/schema.sql".to_string()
}

fn default_migrations_dir() -> String {
    "supabase/migrations".to_string()
}

fn default_tolerated_errors() -> Vec<String> {
    vec!["already exists".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            rpc_path: default_rpc_path(),
            timeout_secs: default_timeout_secs(),
            schema_file: default_schema_file(),
            migrations_dir: default_migrations_dir(),
            splitter: SplitterKind::default(),
            dialect: Dialect::default(),
            response_policy: ResponsePolicy::default(),
            tolerated_errors: default_tolerated_errors(),
            on_statement_error: StatementErrorMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        // An empty file deserializes to unit, not to an empty mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for migrun.yml or migrun.yaml; a project without either uses
    /// the defaults.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("migrun.yml");
        let yaml_path = dir.join("migrun.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            log::debug!("No migrun.yml in {}, using defaults", dir.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if let Some(url) = &self.url {
            validate_url(url)?;
        }

        if !self.rpc_path.starts_with('/') {
            return Err(CoreError::ConfigInvalid {
                message: format!("rpc_path must start with '/', got '{}'", self.rpc_path),
            });
        }

        if self.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }

        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if self.response_policy == ResponsePolicy::Tolerant
            && self.tolerated_errors.iter().all(|e| e.trim().is_empty())
        {
            return Err(CoreError::ConfigInvalid {
                message: "response_policy 'tolerant' needs at least one tolerated_errors entry"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Get the absolute schema file path relative to a project root
    pub fn schema_file_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.schema_file)
    }

    /// Get the absolute migrations directory relative to a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }
}

/// Check that a base URL is an absolute http(s) URL
pub fn validate_url(url: &str) -> CoreResult<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(CoreError::ConfigInvalid {
            message: format!("url must start with http:// or https://, got '{}'", url),
        })
    }
}

impl std::fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitterKind::Naive => write!(f, "naive"),
            SplitterKind::Tokenizer => write!(f, "tokenizer"),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::Generic => write!(f, "generic"),
        }
    }
}

impl std::fmt::Display for ResponsePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponsePolicy::Lenient => write!(f, "lenient"),
            ResponsePolicy::Tolerant => write!(f, "tolerant"),
            ResponsePolicy::Strict => write!(f, "strict"),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
