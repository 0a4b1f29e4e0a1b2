//! SQL dialect abstraction

use sqlparser::dialect::{
    Dialect, GenericDialect as SqlParserGeneric, PostgreSqlDialect as SqlParserPostgres,
};
use sqlparser::tokenizer::{TokenWithSpan, Tokenizer};

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Tokenize SQL, keeping the source span of every token
    fn tokenize(&self, sql: &str) -> SqlResult<Vec<TokenWithSpan>> {
        Tokenizer::new(self.parser_dialect(), sql)
            .tokenize_with_location()
            .map_err(|e| SqlError::TokenizeError {
                message: e.message.clone(),
                line: e.location.line as usize,
                column: e.location.column as usize,
            })
    }

    /// Get the dialect name
    fn name(&self) -> &'static str;
}

/// Look up a dialect by its configuration name
pub fn dialect_from_name(name: &str) -> SqlResult<Box<dyn SqlDialect>> {
    match name.to_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(Box::new(PostgresDialect::new())),
        "generic" => Ok(Box::new(GenericDialect::new())),
        _ => Err(SqlError::UnknownDialect(name.to_string())),
    }
}

/// PostgreSQL dialect (dollar-quoted bodies, `E''` strings)
pub struct PostgresDialect {
    dialect: SqlParserPostgres,
}

impl PostgresDialect {
    /// Create a new PostgreSQL dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserPostgres {},
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// Generic SQL dialect
pub struct GenericDialect {
    dialect: SqlParserGeneric,
}

impl GenericDialect {
    /// Create a new generic dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserGeneric {},
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for GenericDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
