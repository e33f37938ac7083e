#![allow(dead_code)]

use mechanic_shop_core::db::open_db_in_memory;
use mechanic_shop_core::{
    Console, QueryTable, Session, SqliteExecutor, Statement, StatementError, StatementExecutor,
};
use std::cell::RefCell;
use std::io::Cursor;

pub type Scripted<E> = Session<E, Cursor<Vec<u8>>, Vec<u8>>;

/// Session over a fresh in-memory store, fed `lines` as operator input.
pub fn sqlite_session(lines: &[&str]) -> Scripted<SqliteExecutor> {
    session_with(SqliteExecutor::new(open_db_in_memory().unwrap()), lines)
}

pub fn session_with<E: StatementExecutor>(executor: E, lines: &[&str]) -> Scripted<E> {
    let mut script = lines.join("\n");
    script.push('\n');
    Session::new(
        executor,
        Console::new(Cursor::new(script.into_bytes()), Vec::new()),
    )
}

/// Everything written to the operator so far.
pub fn transcript<E: StatementExecutor>(session: &mut Scripted<E>) -> String {
    String::from_utf8_lossy(session.console().output()).into_owned()
}

pub fn seed(session: &Scripted<SqliteExecutor>, sql: &str) {
    session.executor().connection().execute_batch(sql).unwrap();
}

pub fn rows(session: &Scripted<SqliteExecutor>, sql: &str) -> Vec<Vec<String>> {
    session
        .executor()
        .query_collect(&Statement::new("adhoc", sql))
        .unwrap()
}

/// Executor that records mutations and answers every query with `lookup_rows`.
#[derive(Default)]
pub struct RecordingExecutor {
    pub executed: RefCell<Vec<Statement>>,
    pub lookup_rows: Vec<Vec<String>>,
}

impl StatementExecutor for RecordingExecutor {
    fn execute(&self, stmt: &Statement) -> Result<(), StatementError> {
        self.executed.borrow_mut().push(stmt.clone());
        Ok(())
    }

    fn query_table(&self, _stmt: &Statement) -> Result<QueryTable, StatementError> {
        Ok(QueryTable {
            columns: vec![
                "id".to_string(),
                "fname".to_string(),
                "lname".to_string(),
                "phone".to_string(),
                "address".to_string(),
            ],
            rows: self.lookup_rows.clone(),
        })
    }

    fn query_count(&self, stmt: &Statement) -> Result<usize, StatementError> {
        Ok(self.query_table(stmt)?.rows.len())
    }
}
