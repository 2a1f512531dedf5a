use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use super::error::{FileError, FileResult};
use super::{PAGE_SIZE, PageId};

/// Page-granular access to a single database file
pub struct PagedFile {
    file: File,
    path: PathBuf,
}

impl PagedFile {
    /// Open a database file for reading and writing, creating it if absent
    pub fn open<P: AsRef<Path>>(path: P) -> FileResult<Self> {
        let path = path.as_ref();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path the file was opened with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current length of the file in bytes
    pub fn len(&self) -> FileResult<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Read up to `buffer.len()` bytes of a page.
    ///
    /// Returns the number of bytes actually read; a final partial page gives
    /// a short count and leaves the rest of `buffer` untouched.
    pub fn read_page(&mut self, page_id: PageId, buffer: &mut [u8]) -> FileResult<usize> {
        if buffer.len() > PAGE_SIZE {
            return Err(FileError::InvalidPageSize {
                expected: PAGE_SIZE,
                actual: buffer.len(),
            });
        }

        let offset = (page_id * PAGE_SIZE) as u64;
        self.file.seek(SeekFrom::Start(offset))?;

        let mut bytes_read = 0;
        while bytes_read < buffer.len() {
            match self.file.read(&mut buffer[bytes_read..]) {
                Ok(0) => break,
                Ok(n) => bytes_read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        trace!(page_id, bytes_read, "read page");
        Ok(bytes_read)
    }

    /// Write `data` at the start of a page. `data` may be shorter than a page.
    pub fn write_page(&mut self, page_id: PageId, data: &[u8]) -> FileResult<()> {
        if data.len() > PAGE_SIZE {
            return Err(FileError::InvalidPageSize {
                expected: PAGE_SIZE,
                actual: data.len(),
            });
        }

        let offset = (page_id * PAGE_SIZE) as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;

        trace!(page_id, bytes = data.len(), "wrote page");
        Ok(())
    }

    /// Sync file contents and metadata to disk
    pub fn sync(&mut self) -> FileResult<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_open_creates_file() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");

        let file = PagedFile::open(&test_file).unwrap();
        assert!(test_file.exists());
        assert_eq!(file.len().unwrap(), 0);
        assert_eq!(file.path(), test_file.as_path());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("nested").join("dir").join("test.db");

        PagedFile::open(&test_file).unwrap();
        assert!(test_file.exists());
    }

    #[test]
    fn test_open_existing_keeps_contents() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");
        std::fs::write(&test_file, [7u8; 100]).unwrap();

        let file = PagedFile::open(&test_file).unwrap();
        assert_eq!(file.len().unwrap(), 100);
    }

    #[test]
    fn test_read_write_page() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");
        let mut file = PagedFile::open(&test_file).unwrap();

        let mut write_buffer = vec![0u8; PAGE_SIZE];
        write_buffer[0] = 42;
        write_buffer[100] = 99;
        write_buffer[PAGE_SIZE - 1] = 255;
        file.write_page(0, &write_buffer).unwrap();

        let mut read_buffer = vec![0u8; PAGE_SIZE];
        let n = file.read_page(0, &mut read_buffer).unwrap();
        assert_eq!(n, PAGE_SIZE);
        assert_eq!(read_buffer, write_buffer);
    }

    #[test]
    fn test_partial_write_sets_exact_length() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");
        let mut file = PagedFile::open(&test_file).unwrap();

        file.write_page(0, &vec![1u8; PAGE_SIZE]).unwrap();
        file.write_page(1, &[2u8; 10]).unwrap();
        assert_eq!(file.len().unwrap(), (PAGE_SIZE + 10) as u64);
    }

    #[test]
    fn test_short_read_of_final_page() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");
        let mut file = PagedFile::open(&test_file).unwrap();

        file.write_page(0, &[9u8; 10]).unwrap();

        let mut buffer = vec![0xAAu8; PAGE_SIZE];
        let n = file.read_page(0, &mut buffer).unwrap();
        assert_eq!(n, 10);
        assert!(buffer[..10].iter().all(|&b| b == 9));
        // Tail is left as it was
        assert!(buffer[10..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_read_past_end() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");
        let mut file = PagedFile::open(&test_file).unwrap();

        let mut buffer = vec![0u8; PAGE_SIZE];
        assert_eq!(file.read_page(3, &mut buffer).unwrap(), 0);
    }

    #[test]
    fn test_invalid_buffer_size() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");
        let mut file = PagedFile::open(&test_file).unwrap();

        let mut large_buffer = vec![0u8; PAGE_SIZE + 1];
        let result = file.read_page(0, &mut large_buffer);
        assert!(matches!(result, Err(FileError::InvalidPageSize { .. })));

        let result = file.write_page(0, &large_buffer);
        assert!(matches!(result, Err(FileError::InvalidPageSize { .. })));
    }

    #[test]
    fn test_sync_persists() {
        let temp_dir = setup_test_dir();
        let test_file = temp_dir.path().join("test.db");

        let mut file = PagedFile::open(&test_file).unwrap();
        file.write_page(2, &[5u8; 3]).unwrap();
        file.sync().unwrap();
        drop(file);

        let bytes = std::fs::read(&test_file).unwrap();
        assert_eq!(bytes.len(), 2 * PAGE_SIZE + 3);
        assert_eq!(&bytes[2 * PAGE_SIZE..], &[5, 5, 5]);
    }
}
