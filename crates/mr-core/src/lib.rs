//! mr-core - Core library for Migrun
//!
//! This crate provides the `migrun.yml` configuration, the fixed project
//! layout (schema file plus migrations directory), and migration file
//! discovery shared by the other Migrun crates.

pub mod config;
pub mod error;
pub mod layout;
pub mod migration;

pub use config::{Config, Dialect, ResponsePolicy, SplitterKind, StatementErrorMode};
pub use error::{CoreError, CoreResult};
pub use layout::MigrationLayout;
pub use migration::{discover_migrations, MigrationFile};
