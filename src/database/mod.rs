use std::io::{self, BufRead, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::file::{PAGE_SIZE, TABLE_MAX_PAGES};
use crate::record::{
    EMAIL_SIZE, ID_SIZE, ROW_SIZE, ROWS_PER_PAGE, RecordError, RowIter, TABLE_MAX_ROWS, Table,
    USERNAME_SIZE,
};
use crate::statement::{Input, MetaCommand, Statement, prepare_input};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Record error: {0}")]
    RecordError(#[from] RecordError),

    #[error("Cannot write output: {0}")]
    IoError(#[from] io::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// What the caller should do after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
}

/// Result of executing one statement
pub enum Executed<'a> {
    Inserted,
    Selected(RowIter<'a>),
}

/// Run a prepared statement against the table
pub fn execute<'a>(
    statement: &Statement,
    table: &'a mut Table,
) -> Result<Executed<'a>, RecordError> {
    match statement {
        Statement::Insert(row) => {
            table.insert(row)?;
            Ok(Executed::Inserted)
        }
        Statement::Select => Ok(Executed::Selected(table.select())),
    }
}

/// An open database: the table plus the command interpreter around it
pub struct Database {
    table: Table,
}

impl Database {
    /// Open the database file, creating it if it does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> DatabaseResult<Self> {
        let table = Table::open(path)?;
        Ok(Self { table })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Handle one input line, writing its output to `out`.
    ///
    /// Validation errors and a full table are reported on `out` and the
    /// session goes on. Storage and output failures are returned.
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> DatabaseResult<LineOutcome> {
        let line = line.trim_end_matches(['\n', '\r']);

        let input = match prepare_input(line) {
            Ok(input) => input,
            Err(e) => {
                debug!(line, error = %e, "rejected input");
                writeln!(out, "{}", e)?;
                return Ok(LineOutcome::Continue);
            }
        };

        match input {
            Input::Meta(MetaCommand::Exit) => return Ok(LineOutcome::Exit),
            Input::Meta(MetaCommand::Constants) => print_constants(out)?,
            Input::Statement(statement) => match execute(&statement, &mut self.table) {
                Ok(Executed::Inserted) => writeln!(out, "Executed.")?,
                Ok(Executed::Selected(rows)) => {
                    for row in rows {
                        writeln!(out, "{}", row?)?;
                    }
                    writeln!(out, "Executed.")?;
                }
                Err(RecordError::TableFull { .. }) => writeln!(out, "Error: Table full.")?,
                Err(e) => return Err(e.into()),
            },
        }

        Ok(LineOutcome::Continue)
    }

    /// Drive the interpreter from a line source until `.exit` or end of input.
    /// `prompt` is written before every line is read.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        prompt: &str,
    ) -> DatabaseResult<()> {
        let mut line = String::new();
        loop {
            write!(out, "{}", prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }

            if self.run_line(&line, out)? == LineOutcome::Exit {
                return Ok(());
            }
        }
    }

    /// Flush the table to disk and close it
    pub fn close(self) -> DatabaseResult<()> {
        self.table.close()?;
        Ok(())
    }
}

fn print_constants<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Constants:")?;
    writeln!(out, "ROW_SIZE: {}", ROW_SIZE)?;
    writeln!(out, "ID_SIZE: {}", ID_SIZE)?;
    writeln!(out, "USERNAME_SIZE: {}", USERNAME_SIZE)?;
    writeln!(out, "EMAIL_SIZE: {}", EMAIL_SIZE)?;
    writeln!(out, "PAGE_SIZE: {}", PAGE_SIZE)?;
    writeln!(out, "ROWS_PER_PAGE: {}", ROWS_PER_PAGE)?;
    writeln!(out, "TABLE_MAX_PAGES: {}", TABLE_MAX_PAGES)?;
    writeln!(out, "TABLE_MAX_ROWS: {}", TABLE_MAX_ROWS)
}
