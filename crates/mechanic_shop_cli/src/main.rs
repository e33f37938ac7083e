//! Front-desk console entry point.
//!
//! Usage: `mechanic_shop <dbname> <port> <user>`.

use mechanic_shop_core::config::LogSettings;
use mechanic_shop_core::{app, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let settings = LogSettings::from_env();
    if let Err(err) = init_logging(&settings.level, &settings.dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdin = std::io::stdin();
    let code = app::run(&args, stdin.lock(), std::io::stdout(), &mut std::io::stderr());
    log::logger().flush();
    ExitCode::from(code)
}
