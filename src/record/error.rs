use crate::file::FileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Table full: capacity is {max_rows} rows")]
    TableFull { max_rows: usize },

    #[error("Field {field} is {actual} bytes, max is {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

pub type RecordResult<T> = Result<T, RecordError>;
