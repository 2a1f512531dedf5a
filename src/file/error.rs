use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Page out of bounds: page_id={page_id}, max_pages={max_pages}")]
    PageOutOfBounds { page_id: usize, max_pages: usize },

    #[error("Tried to flush a page that is not cached: page_id={0}")]
    PageNotCached(usize),

    #[error("Invalid page size: expected at most {expected}, got {actual}")]
    InvalidPageSize { expected: usize, actual: usize },
}

pub type FileResult<T> = Result<T, FileError>;
