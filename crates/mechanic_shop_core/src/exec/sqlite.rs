//! SQLite implementation of the statement executor.

use super::{ExecResult, QueryTable, Statement, StatementExecutor};
use crate::db::DbError;
use log::{debug, warn};
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use std::time::Instant;

/// Executor owning the session's only SQLite connection.
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow of the underlying connection, for bootstrap checks and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting a failure instead of ignoring it.
    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, err)| DbError::Sqlite(err))
    }
}

impl StatementExecutor for SqliteExecutor {
    fn execute(&self, stmt: &Statement) -> ExecResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .prepare(stmt.sql())
            .and_then(|mut prepared| prepared.execute(params_from_iter(stmt.params())));
        log_outcome("execute", stmt, started_at, result.as_ref().err());
        result?;
        Ok(())
    }

    fn query_table(&self, stmt: &Statement) -> ExecResult<QueryTable> {
        let started_at = Instant::now();
        let result = collect_table(&self.conn, stmt);
        log_outcome("query", stmt, started_at, result.as_ref().err());
        Ok(result?)
    }

    fn query_count(&self, stmt: &Statement) -> ExecResult<usize> {
        let started_at = Instant::now();
        let result = count_rows(&self.conn, stmt);
        log_outcome("count", stmt, started_at, result.as_ref().err());
        Ok(result?)
    }
}

fn collect_table(conn: &Connection, stmt: &Statement) -> rusqlite::Result<QueryTable> {
    let mut prepared = conn.prepare(stmt.sql())?;
    let columns: Vec<String> = prepared
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let column_count = columns.len();

    let mut rows = prepared.query(params_from_iter(stmt.params()))?;
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Vec::with_capacity(column_count);
        for index in 0..column_count {
            record.push(value_to_text(row.get_ref(index)?));
        }
        collected.push(record);
    }

    Ok(QueryTable {
        columns,
        rows: collected,
    })
}

fn count_rows(conn: &Connection, stmt: &Statement) -> rusqlite::Result<usize> {
    let mut prepared = conn.prepare(stmt.sql())?;
    let mut rows = prepared.query(params_from_iter(stmt.params()))?;
    let mut count = 0;
    while rows.next()?.is_some() {
        count += 1;
    }
    Ok(count)
}

fn value_to_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "null".to_string(),
        ValueRef::Integer(number) => number.to_string(),
        ValueRef::Real(number) => number.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn log_outcome(
    mode: &str,
    stmt: &Statement,
    started_at: Instant,
    error: Option<&rusqlite::Error>,
) {
    match error {
        None => debug!(
            "event=statement module=exec status=ok mode={mode} statement={} duration_ms={}",
            stmt.name(),
            started_at.elapsed().as_millis()
        ),
        Some(err) => warn!(
            "event=statement module=exec status=error mode={mode} statement={} duration_ms={} error={}",
            stmt.name(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
}
