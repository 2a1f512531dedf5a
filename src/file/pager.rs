use std::path::Path;

use tracing::debug;

use super::error::{FileError, FileResult};
use super::file_manager::PagedFile;
use super::{PAGE_SIZE, PageId, TABLE_MAX_PAGES};

/// An owned page buffer, always exactly PAGE_SIZE bytes
type PageBuf = Box<[u8]>;

/// Page cache over a single database file.
///
/// Pages are loaded on first access and stay cached until released; there is
/// no eviction. A cached page is handed out by reference, so writes through
/// one `get_page` call are seen by every later one without touching disk.
pub struct Pager {
    /// Underlying file
    file: PagedFile,
    /// File length in bytes at open time
    file_length: u64,
    /// Page table indexed by page ID; `None` means not loaded yet
    pages: Vec<Option<PageBuf>>,
}

impl Pager {
    /// Open (or create) the file and start with an empty page table
    pub fn open<P: AsRef<Path>>(path: P) -> FileResult<Self> {
        let file = PagedFile::open(path)?;
        let file_length = file.len()?;

        debug!(path = %file.path().display(), file_length, "opened pager");

        Ok(Self {
            file,
            file_length,
            pages: (0..TABLE_MAX_PAGES).map(|_| None).collect(),
        })
    }

    /// File length in bytes as seen when the pager was opened
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Number of whole or partial pages present on disk at open time
    pub fn pages_on_disk(&self) -> usize {
        self.file_length.div_ceil(PAGE_SIZE as u64) as usize
    }

    /// Get a page, loading it from disk if necessary
    pub fn get_page(&mut self, page_id: PageId) -> FileResult<&mut [u8]> {
        if page_id >= self.pages.len() {
            return Err(FileError::PageOutOfBounds {
                page_id,
                max_pages: self.pages.len(),
            });
        }

        let page = match self.pages[page_id].take() {
            Some(page) => page,
            None => self.load_page(page_id)?,
        };

        Ok(&mut self.pages[page_id].insert(page)[..])
    }

    /// Write the first `size` bytes of a cached page back to disk
    pub fn flush(&mut self, page_id: PageId, size: usize) -> FileResult<()> {
        if size > PAGE_SIZE {
            return Err(FileError::InvalidPageSize {
                expected: PAGE_SIZE,
                actual: size,
            });
        }

        let page = self
            .pages
            .get(page_id)
            .and_then(Option::as_deref)
            .ok_or(FileError::PageNotCached(page_id))?;

        self.file.write_page(page_id, &page[..size])?;
        debug!(page_id, size, "flushed page");
        Ok(())
    }

    /// Drop a cached page without writing it. Returns whether it was cached.
    pub fn release(&mut self, page_id: PageId) -> bool {
        self.pages
            .get_mut(page_id)
            .and_then(Option::take)
            .is_some()
    }

    /// Check if a page is in the page table
    pub fn is_page_cached(&self, page_id: PageId) -> bool {
        matches!(self.pages.get(page_id), Some(Some(_)))
    }

    /// Get the number of pages currently cached
    pub fn cached_page_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_some()).count()
    }

    /// Drop every cached page without writing it. Returns how many were dropped.
    pub fn release_all(&mut self) -> usize {
        let discarded = self.pages.iter_mut().filter_map(Option::take).count();
        if discarded > 0 {
            debug!(discarded, "released unflushed pages");
        }
        discarded
    }

    /// Sync everything flushed so far to disk
    pub fn sync(&mut self) -> FileResult<()> {
        self.file.sync()
    }

    /// Allocate a page buffer and fill it from disk if the page exists there
    fn load_page(&mut self, page_id: PageId) -> FileResult<PageBuf> {
        let mut page = vec![0u8; PAGE_SIZE].into_boxed_slice();

        if page_id < self.pages_on_disk() {
            let bytes_read = self.file.read_page(page_id, &mut page)?;
            debug!(page_id, bytes_read, "loaded page from disk");
        } else {
            debug!(page_id, "allocated new page");
        }

        Ok(page)
    }
}
