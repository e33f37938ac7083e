//! Front-desk console core for a vehicle repair shop.
//!
//! Owns the menu loop, field validation, entity workflows and the statement
//! executor over the shop's SQLite store.

pub mod app;
pub mod config;
pub mod console;
pub mod db;
pub mod dispatch;
pub mod exec;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod session;
pub mod workflow;

pub use console::{Console, InputError, Rejection};
pub use dispatch::{DispatchState, MenuChoice};
pub use exec::{QueryTable, SqliteExecutor, Statement, StatementError, StatementExecutor};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Car, ClosedRequest, Customer, Mechanic, Ownership, RequestState, ServiceRequest,
    ValidationError,
};
pub use report::Report;
pub use session::Session;
pub use workflow::{WorkflowError, WorkflowResult};
