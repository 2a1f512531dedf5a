mod lexer;
mod parser;

pub use lexer::{Token, lexer};
pub use parser::{prepare_input, prepare_meta_command, prepare_statement};

use thiserror::Error;

use crate::record::Row;

/// A validated statement ready for execution
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// Non-SQL commands starting with `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Constants,
}

/// One line of input after preparation
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Meta(MetaCommand),
    Statement(Statement),
}

/// Reasons a line is rejected before reaching the table.
/// The messages are what the interpreter prints.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,
}

pub type PrepareResult<T> = Result<T, PrepareError>;
