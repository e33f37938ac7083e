//! Line-oriented operator console and field validator.
//!
//! # Responsibility
//! - Prompt for one field at a time, parse and check it, re-prompt on failure.
//! - Echo every accepted value and every rejection back to the operator.
//!
//! # Invariants
//! - Rejections are values; a bad line never leaves `prompt_field`.
//! - There is no retry bound. Only end of input or an I/O failure stops a
//!   prompt without a valid value.
//! - Operator-entered values are never written to logs.

use crate::model::ValidationError;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

mod fields;

pub use fields::{accept, integer, non_empty, non_negative, rule, text};

pub type InputResult<T> = Result<T, InputError>;

/// Unrecoverable console failure.
#[derive(Debug)]
pub enum InputError {
    /// The operator's input stream reached end of file.
    Closed,
    Io(std::io::Error),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "operator input closed"),
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Closed => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Why one input line was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The line could not be parsed into the field's type.
    Parse {
        input: String,
        expected: &'static str,
    },
    /// The parsed value broke the field's rule.
    Predicate(String),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { input, expected } => {
                write!(f, "invalid input `{input}`: expected {expected}")
            }
            Self::Predicate(reason) => write!(f, "invalid input: {reason}"),
        }
    }
}

impl From<ValidationError> for Rejection {
    fn from(value: ValidationError) -> Self {
        Self::Predicate(value.to_string())
    }
}

/// Operator console over any buffered reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    rejected: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            rejected: 0,
        }
    }

    /// Writes one line to the operator.
    pub fn say(&mut self, line: impl Display) -> InputResult<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line without its line terminator.
    ///
    /// A line that is not valid UTF-8 comes back as a parse rejection so the
    /// caller can re-prompt; only end of input and I/O failures are errors.
    pub fn read_line(&mut self) -> InputResult<Result<String, Rejection>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(InputError::Closed);
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        Ok(String::from_utf8(bytes).map_err(|err| Rejection::Parse {
            input: String::from_utf8_lossy(err.as_bytes()).into_owned(),
            expected: "UTF-8 text",
        }))
    }

    /// Prompts until a line both parses and passes `check`.
    ///
    /// Each rejected line is echoed with its reason and counted; the accepted
    /// value is echoed before it is returned.
    pub fn prompt_field<T, P, C>(&mut self, label: &str, parse: P, check: C) -> InputResult<T>
    where
        T: Display,
        P: Fn(&str) -> Result<T, Rejection>,
        C: Fn(&T) -> Result<(), Rejection>,
    {
        loop {
            self.say(label)?;
            let line = self.read_line()?;
            match line
                .and_then(|line| parse(line.as_str()))
                .and_then(|value| check(&value).map(|()| value))
            {
                Ok(value) => {
                    self.say(&value)?;
                    return Ok(value);
                }
                Err(rejection) => {
                    self.rejected += 1;
                    debug!(
                        "event=input_rejected module=console kind={}",
                        match &rejection {
                            Rejection::Parse { .. } => "parse",
                            Rejection::Predicate(_) => "predicate",
                        }
                    );
                    self.say(&rejection)?;
                }
            }
        }
    }

    /// Prompts for required free text.
    pub fn prompt_text(&mut self, label: &str, field: &'static str) -> InputResult<String> {
        self.prompt_field(label, text, non_empty(field))
    }

    /// Prompts for a non-negative integer identifier or counter.
    pub fn prompt_id(&mut self, label: &str, field: &'static str) -> InputResult<i64> {
        self.prompt_field(label, integer, non_negative(field))
    }

    /// Number of lines rejected since this console was created.
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Operator output stream, for printing query results.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
