mod addressing;
mod error;
mod row;
mod table;

pub use addressing::{RowLocation, locate, rows_in_file};
pub use error::{RecordError, RecordResult};
pub use row::Row;
pub use table::{RowIter, Table};

use crate::file::{PAGE_SIZE, TABLE_MAX_PAGES};

/// Longest username accepted, in bytes
pub const COLUMN_USERNAME_SIZE: usize = 32;
/// Longest email accepted, in bytes
pub const COLUMN_EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = size_of::<u32>();
// One extra byte per string for the terminator
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;
