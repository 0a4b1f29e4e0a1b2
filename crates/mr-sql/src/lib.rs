//! mr-sql - SQL statement splitting for Migrun
//!
//! This crate cuts the text of a migration file into the individual
//! statements sent to the remote endpoint, either with a plain `;` split or
//! with the sqlparser-rs tokenizer.

pub mod dialect;
pub mod error;
pub mod splitter;

pub use dialect::{GenericDialect, PostgresDialect, SqlDialect};
pub use error::SqlError;
pub use splitter::{Statement, StatementSplitter};
