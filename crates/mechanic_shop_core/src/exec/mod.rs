//! Statement execution boundary.
//!
//! # Responsibility
//! - Carry SQL text and its bound values as one `Statement`.
//! - Offer the four execution modes workflows and reports need: run and
//!   discard, run and print, run and materialize, run and count.
//!
//! # Invariants
//! - Values are always bound, never spliced into SQL text.
//! - Materialized values are text; NULL renders as `null`.
//! - `query_print` and `query_collect` over one statement see the same rows.

use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

mod sqlite;

pub use sqlite::SqliteExecutor;

pub type ExecResult<T> = Result<T, StatementError>;

/// Failure of a single statement execution.
#[derive(Debug)]
pub enum StatementError {
    /// The store rejected the statement (constraint, syntax, connectivity).
    Store(rusqlite::Error),
    /// Rows were read but could not be written to the operator console.
    Output(std::io::Error),
}

impl Display for StatementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "statement rejected by store: {err}"),
            Self::Output(err) => write!(f, "failed to write query output: {err}"),
        }
    }
}

impl Error for StatementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StatementError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for StatementError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

/// One unit of database work with its bound parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    name: &'static str,
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    /// Creates a statement. `name` is a stable label used in log events.
    pub fn new(name: &'static str, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Binds the next positional text parameter.
    pub fn bind_text(mut self, value: impl Into<String>) -> Self {
        self.params.push(Value::Text(value.into()));
        self
    }

    /// Binds the next positional integer parameter.
    pub fn bind_int(mut self, value: i64) -> Self {
        self.params.push(Value::Integer(value));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Materialized result of a row-returning statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTable {
    /// Column names in select-list order.
    pub columns: Vec<String>,
    /// Rows of string-coerced values, one entry per column.
    pub rows: Vec<Vec<String>>,
}

/// Executor over the store's single connection.
///
/// Every call prepares its own statement handle and drops it before
/// returning, whatever the outcome. Each call is a single attempt.
pub trait StatementExecutor {
    /// Runs a mutating statement and discards any change count.
    fn execute(&self, stmt: &Statement) -> ExecResult<()>;

    /// Runs a row-returning statement and materializes columns and rows.
    fn query_table(&self, stmt: &Statement) -> ExecResult<QueryTable>;

    /// Runs a row-returning statement and returns only how many rows it produced.
    fn query_count(&self, stmt: &Statement) -> ExecResult<usize>;

    /// Runs a row-returning statement and returns its rows as text.
    fn query_collect(&self, stmt: &Statement) -> ExecResult<Vec<Vec<String>>> {
        Ok(self.query_table(stmt)?.rows)
    }

    /// Runs a row-returning statement, prints it to `out` and returns the row count.
    fn query_print(&self, stmt: &Statement, out: &mut dyn Write) -> ExecResult<usize> {
        let table = self.query_table(stmt)?;
        write_table(&table, out)?;
        Ok(table.rows.len())
    }
}

/// Writes a header line once, then one tab-separated line per row.
///
/// Nothing is written for an empty result.
pub fn write_table(table: &QueryTable, out: &mut dyn Write) -> std::io::Result<()> {
    if table.rows.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", table.columns.join("\t"))?;
    for row in &table.rows {
        writeln!(out, "{}", row.join("\t"))?;
    }
    out.flush()
}
