//! Entity workflows: collect validated fields, then persist.
//!
//! # Responsibility
//! - One workflow per record the desk creates, plus closing a request.
//! - Map store and input failures into one workflow error for the dispatcher.
//!
//! # Invariants
//! - No statement is issued until every field of its record is collected.
//! - One insert per record; a failed insert is reported, never retried.
//! - Error messages name columns, never stored or entered values.

use crate::console::InputError;
use crate::exec::StatementError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod car;
mod close_request;
mod customer;
mod mechanic;
mod service_request;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Reason a workflow was abandoned.
#[derive(Debug)]
pub enum WorkflowError {
    Input(InputError),
    Statement(StatementError),
    Validation(ValidationError),
    /// A lookup returned a value the workflow cannot interpret.
    InvalidData(String),
    /// An earlier insert of the workflow was stored before a later one failed.
    PartialWrite {
        saved: String,
        failed: StatementError,
    },
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Statement(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "invalid record: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
            Self::PartialWrite { saved, failed } => {
                write!(f, "{saved} was saved, but the next step failed: {failed}")
            }
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Statement(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::PartialWrite { failed, .. } => Some(failed),
        }
    }
}

impl From<InputError> for WorkflowError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<StatementError> for WorkflowError {
    fn from(value: StatementError) -> Self {
        Self::Statement(value)
    }
}

impl From<ValidationError> for WorkflowError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Reads an integer column out of a materialized row.
fn int_column(row: &[String], index: usize, column: &str) -> WorkflowResult<i64> {
    let value = row
        .get(index)
        .ok_or_else(|| WorkflowError::InvalidData(format!("missing column `{column}`")))?;
    value.parse().map_err(|_| {
        WorkflowError::InvalidData(format!("non-integer value in column `{column}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::int_column;

    #[test]
    fn int_column_error_names_column_without_value() {
        let row = vec!["555-SECRET".to_string()];

        let message = int_column(&row, 0, "id").unwrap_err().to_string();

        assert_eq!(message, "invalid stored data: non-integer value in column `id`");
        assert!(!message.contains("555-SECRET"));
    }

    #[test]
    fn int_column_reads_integer() {
        let row = vec!["42".to_string()];
        assert_eq!(int_column(&row, 0, "id").unwrap(), 42);
    }
}
