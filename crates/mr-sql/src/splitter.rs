//! Statement splitting
//!
//! Two strategies are provided:
//!
//! - **naive** cuts at every `;` character. A `;` inside a string literal,
//!   a comment, or a dollar-quoted function body ends the statement early.
//!   Migration authors using this mode must keep semicolons out of literals.
//! - **tokenizer** runs the sqlparser-rs tokenizer and cuts only at
//!   top-level `;` tokens. Statement text is sliced from the source, so
//!   quoting and inner whitespace are preserved exactly.
//!
//! Both strategies trim every fragment and drop fragments that hold nothing
//! but whitespace and comments.

use sqlparser::tokenizer::{Location, Token};

use crate::dialect::{dialect_from_name, PostgresDialect, SqlDialect};
use crate::error::SqlResult;

/// One statement cut from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based position within the file
    pub index: usize,

    /// Trimmed statement text, without the terminating `;`
    pub sql: String,
}

enum SplitMode {
    Naive,
    Tokenizer(Box<dyn SqlDialect>),
}

/// Splits file content into executable statements
pub struct StatementSplitter {
    mode: SplitMode,
}

impl StatementSplitter {
    /// Create a splitter that cuts at every `;`
    pub fn naive() -> Self {
        Self {
            mode: SplitMode::Naive,
        }
    }

    /// Create a tokenizer-aware splitter for PostgreSQL
    pub fn postgres() -> Self {
        Self {
            mode: SplitMode::Tokenizer(Box::new(PostgresDialect::new())),
        }
    }

    /// Create a tokenizer-aware splitter from a dialect name
    pub fn tokenizer(dialect: &str) -> SqlResult<Self> {
        Ok(Self {
            mode: SplitMode::Tokenizer(dialect_from_name(dialect)?),
        })
    }

    /// Name of the strategy, for progress output
    pub fn mode_name(&self) -> &'static str {
        match &self.mode {
            SplitMode::Naive => "naive",
            SplitMode::Tokenizer(_) => "tokenizer",
        }
    }

    /// Split SQL text into numbered statements
    pub fn split(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let fragments = match &self.mode {
            SplitMode::Naive => split_naive(sql),
            SplitMode::Tokenizer(dialect) => split_tokens(dialect.as_ref(), sql)?,
        };

        Ok(fragments
            .into_iter()
            .enumerate()
            .map(|(i, sql)| Statement { index: i + 1, sql })
            .collect())
    }
}

impl Default for StatementSplitter {
    fn default() -> Self {
        Self::naive()
    }
}

fn split_naive(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|fragment| !is_comment_only(fragment))
        .map(String::from)
        .collect()
}

/// True when the fragment has nothing but whitespace, `--` comments and
/// `/* */` comments. An unterminated block comment runs to the end.
fn is_comment_only(fragment: &str) -> bool {
    let mut rest = fragment.trim_start();
    loop {
        if rest.is_empty() {
            return true;
        }
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.find('\n').map_or("", |i| &after[i + 1..]);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |i| &after[i + 2..]);
        } else {
            return false;
        }
        rest = rest.trim_start();
    }
}

fn split_tokens(dialect: &dyn SqlDialect, sql: &str) -> SqlResult<Vec<String>> {
    let tokens = dialect.tokenize(sql)?;
    let line_starts = line_start_offsets(sql);

    let mut fragments = Vec::new();
    let mut start = 0;
    let mut has_code = false;

    for token in &tokens {
        match &token.token {
            Token::SemiColon => {
                let end = byte_offset(sql, &line_starts, token.span.start);
                if has_code {
                    fragments.push(sql[start..end].trim().to_string());
                }
                // ';' is a single byte
                start = end + 1;
                has_code = false;
            }
            Token::Whitespace(_) | Token::EOF => {}
            _ => has_code = true,
        }
    }

    if has_code && start < sql.len() {
        fragments.push(sql[start..].trim().to_string());
    }

    log::debug!(
        "Tokenizer ({}) produced {} statements",
        dialect.name(),
        fragments.len()
    );
    Ok(fragments)
}

fn line_start_offsets(sql: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(sql.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Convert a 1-based line/column (columns counted in chars) into a byte
/// offset into `sql`.
fn byte_offset(sql: &str, line_starts: &[usize], location: Location) -> usize {
    let line = (location.line as usize).saturating_sub(1);
    let Some(&line_start) = line_starts.get(line) else {
        return sql.len();
    };
    let column = (location.column as usize).saturating_sub(1);
    sql[line_start..]
        .char_indices()
        .nth(column)
        .map_or(sql.len(), |(i, _)| line_start + i)
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
