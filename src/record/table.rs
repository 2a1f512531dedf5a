use std::path::Path;

use tracing::{debug, info, warn};

use super::addressing::{locate, rows_in_file};
use super::error::{RecordError, RecordResult};
use super::row::Row;
use super::{ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_ROWS};
use crate::file::{PAGE_SIZE, Pager};

/// The single append-only table stored in one paged file
pub struct Table {
    pager: Pager,
    num_rows: usize,
    closed: bool,
}

impl Table {
    /// Open a table file, creating it if it does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> RecordResult<Self> {
        let path = path.as_ref();
        let pager = Pager::open(path)?;

        let stored_rows = rows_in_file(pager.file_length());
        if stored_rows > TABLE_MAX_ROWS {
            warn!(
                stored_rows,
                max_rows = TABLE_MAX_ROWS,
                "file holds more rows than the table can address, ignoring the excess"
            );
        }
        let num_rows = stored_rows.min(TABLE_MAX_ROWS);

        info!(path = %path.display(), num_rows, "opened table");

        Ok(Self {
            pager,
            num_rows,
            closed: false,
        })
    }

    /// Get the number of rows in the table
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Get the underlying pager
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Append a row to the end of the table
    pub fn insert(&mut self, row: &Row) -> RecordResult<()> {
        if self.num_rows >= TABLE_MAX_ROWS {
            debug!(num_rows = self.num_rows, "insert rejected, table full");
            return Err(RecordError::TableFull {
                max_rows: TABLE_MAX_ROWS,
            });
        }

        let slot = locate(self.num_rows);
        let page = self.pager.get_page(slot.page_id)?;
        row.serialize(&mut page[slot.byte_offset..]);
        self.num_rows += 1;

        Ok(())
    }

    /// Scan every row in insertion order.
    ///
    /// Pages are loaded as the iterator reaches them; calling `select` again
    /// starts a fresh scan from row 0.
    pub fn select(&mut self) -> RowIter<'_> {
        RowIter {
            table: self,
            next_row: 0,
        }
    }

    /// Flush every valid row to disk and close the file
    pub fn close(mut self) -> RecordResult<()> {
        self.closed = true;
        self.flush_pages()?;
        self.pager.sync()?;
        info!(num_rows = self.num_rows, "closed table");
        Ok(())
    }

    /// Write back cached pages holding rows, then drop the whole cache.
    ///
    /// Full pages go out as whole PAGE_SIZE buffers; the last partial page
    /// writes only its valid rows so no padding lands past the final row.
    fn flush_pages(&mut self) -> RecordResult<()> {
        let full_pages = self.num_rows / ROWS_PER_PAGE;

        for page_id in 0..full_pages {
            if self.pager.is_page_cached(page_id) {
                self.pager.flush(page_id, PAGE_SIZE)?;
                self.pager.release(page_id);
            }
        }

        let additional_rows = self.num_rows % ROWS_PER_PAGE;
        if additional_rows > 0 {
            let page_id = full_pages;
            if self.pager.is_page_cached(page_id) {
                self.pager.flush(page_id, additional_rows * ROW_SIZE)?;
                self.pager.release(page_id);
            }
        }

        self.pager.release_all();
        Ok(())
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let result = self
            .flush_pages()
            .and_then(|()| self.pager.sync().map_err(RecordError::from));
        if let Err(e) = result {
            warn!(error = %e, "failed to flush table on drop");
        }
    }
}

/// Streaming scan over a table's rows
pub struct RowIter<'a> {
    table: &'a mut Table,
    next_row: usize,
}

impl Iterator for RowIter<'_> {
    type Item = RecordResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.table.num_rows {
            return None;
        }

        let slot = locate(self.next_row);
        self.next_row += 1;

        let row = self
            .table
            .pager
            .get_page(slot.page_id)
            .map(|page| Row::deserialize(&page[slot.byte_offset..]))
            .map_err(RecordError::from);
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.num_rows.saturating_sub(self.next_row);
        (remaining, Some(remaining))
    }
}
