mod error;
mod file_manager;
mod pager;

pub use error::{FileError, FileResult};
pub use file_manager::PagedFile;
pub use pager::Pager;

/// Page size in bytes (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Upper bound on the number of pages a table file may hold
pub const TABLE_MAX_PAGES: usize = 100;

/// Page ID type
pub type PageId = usize;
