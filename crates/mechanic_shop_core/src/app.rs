//! Session bootstrap and teardown around the menu loop.
//!
//! # Responsibility
//! - Validate process arguments before any store access.
//! - Open the store, run one operator session, close the store.
//!
//! # Invariants
//! - Usage errors exit with `EXIT_USAGE` and never open the store.
//! - Store open failures exit with `EXIT_CONNECT`.

use crate::config::{ConnectArgs, USAGE};
use crate::console::Console;
use crate::db::open_db;
use crate::exec::SqliteExecutor;
use crate::session::Session;
use log::{error, info, warn};
use std::io::{BufRead, Write};

pub const EXIT_OK: u8 = 0;
pub const EXIT_CONNECT: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// Runs the console application and returns the process exit status.
///
/// `args` excludes the program name.
pub fn run<R: BufRead, W: Write>(
    args: &[String],
    input: R,
    mut output: W,
    errors: &mut impl Write,
) -> u8 {
    let connect = match ConnectArgs::parse(args) {
        Ok(connect) => connect,
        Err(err) => {
            warn!("event=app_args module=app status=error error={err}");
            report_write("errors", writeln!(errors, "{err}\n{USAGE}"));
            return EXIT_USAGE;
        }
    };

    let path = connect.database_path();
    report_write(
        "output",
        writeln!(
            output,
            "Connecting to database {} (port {}, user {})...",
            path.display(),
            connect.port,
            connect.user
        ),
    );
    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=app_connect module=app status=error error={err}");
            report_write(
                "errors",
                writeln!(errors, "Error - unable to connect to database: {err}"),
            );
            return EXIT_CONNECT;
        }
    };
    report_write("output", writeln!(output, "Done"));
    info!(
        "event=app_connect module=app status=ok port={} user={}",
        connect.port, connect.user
    );

    let mut session = Session::new(SqliteExecutor::new(conn), Console::new(input, output));
    let outcome = session.run();
    let (executor, console) = session.into_parts();
    let (_, mut output) = console.into_parts();

    report_write("output", write!(output, "Disconnecting from database..."));
    if let Err(err) = executor.close() {
        warn!("event=app_disconnect module=app status=error error={err}");
    }
    report_write("output", writeln!(output, "Done\n\nBye !"));

    match outcome {
        Ok(()) => EXIT_OK,
        Err(err) => {
            error!("event=app_session module=app status=error error={err}");
            report_write("errors", writeln!(errors, "{err}"));
            EXIT_CONNECT
        }
    }
}

/// Console writes outside the session have no caller to report to; log them.
fn report_write(stream: &str, result: std::io::Result<()>) {
    if let Err(err) = result {
        warn!("event=app_write module=app status=error stream={stream} error={err}");
    }
}
