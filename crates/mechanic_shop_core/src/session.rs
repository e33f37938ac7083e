//! Operator session: the one connection plus the console, passed by `&mut`
//! into every workflow.

use crate::console::Console;
use crate::exec::StatementExecutor;
use std::io::{BufRead, Write};
use uuid::Uuid;

/// State owned by one front-desk session.
///
/// # Invariants
/// - The executor is the only path to the store for the session lifetime.
/// - `id` correlates log events and never leaves the log.
pub struct Session<E, R, W> {
    pub(crate) executor: E,
    pub(crate) console: Console<R, W>,
    id: Uuid,
}

impl<E: StatementExecutor, R: BufRead, W: Write> Session<E, R, W> {
    pub fn new(executor: E, console: Console<R, W>) -> Self {
        Self {
            executor,
            console,
            id: Uuid::new_v4(),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn console(&mut self) -> &mut Console<R, W> {
        &mut self.console
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Ends the session, handing back the executor for teardown.
    pub fn into_parts(self) -> (E, Console<R, W>) {
        (self.executor, self.console)
    }
}
