pub mod config;
pub mod database;
pub mod file;
pub mod record;
pub mod statement;

pub use config::{ConfigError, ReplConfig};
pub use database::{Database, DatabaseError, DatabaseResult, Executed, LineOutcome, execute};
pub use file::{FileError, FileResult, PAGE_SIZE, PagedFile, Pager, TABLE_MAX_PAGES};
pub use record::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_SIZE, ID_SIZE, ROW_SIZE, ROWS_PER_PAGE,
    RecordError, RecordResult, Row, RowIter, RowLocation, TABLE_MAX_ROWS, Table, USERNAME_SIZE,
    locate,
};
pub use statement::{Input, MetaCommand, PrepareError, Statement, prepare_input};
