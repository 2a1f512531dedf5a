use super::{ROW_SIZE, ROWS_PER_PAGE};
use crate::file::{PAGE_SIZE, PageId};

/// Physical location of a row: the page holding it and its byte offset there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLocation {
    pub page_id: PageId,
    pub byte_offset: usize,
}

/// Map a row index to its slot. Insert and select both go through here.
pub fn locate(row_num: usize) -> RowLocation {
    RowLocation {
        page_id: row_num / ROWS_PER_PAGE,
        byte_offset: (row_num % ROWS_PER_PAGE) * ROW_SIZE,
    }
}

/// Number of complete rows stored in a file of `file_length` bytes.
///
/// Full pages are written with their padding tail, so only the final short
/// page is divided by the row size. Trailing bytes of a partial row are
/// ignored.
pub fn rows_in_file(file_length: u64) -> usize {
    let page_size = PAGE_SIZE as u64;
    let full_pages = (file_length / page_size) as usize;
    let tail_rows = ((file_length % page_size) as usize / ROW_SIZE).min(ROWS_PER_PAGE);
    full_pages * ROWS_PER_PAGE + tail_rows
}
