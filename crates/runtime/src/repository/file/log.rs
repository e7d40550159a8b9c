//! Append-only log file repository.
//!
//! `FileRepository<T>` stores any serializable type as length-prefixed
//! bincode frames. [`FileActionLog`] is the instance used for execution
//! records.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::repository::traits::ActionLog;
use crate::repository::{ActionLogEntry, RepositoryError, Result};

/// Action log backed by a file.
pub type FileActionLog = FileRepository<ActionLogEntry>;

const WRITE_BUFFER: usize = 64 * 1024;

// ============================================================================
// Generic FileRepository
// ============================================================================

/// Generic file-based repository for append-only logs.
///
/// Stores items of type `T` in a file using the format:
/// ```text
/// [u32 LE length][bincode serialized T]
/// [u32 LE length][bincode serialized T]
/// ...
/// ```
pub struct FileRepository<T> {
    /// Filename identifier (e.g. "actions.log")
    session_id: String,
    path: PathBuf,
    writer: BufWriter<File>,
    /// Byte offset of the next write
    current_offset: u64,
    _phantom: PhantomData<T>,
}

impl<T> FileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a new file repository.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let filename = filename.as_ref();

        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename);
        if path.exists() {
            return Err(RepositoryError::LogExists(path));
        }

        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)?;

        tracing::debug!("Created repository: {}", path.display());

        Ok(Self::from_parts(filename, path, file, 0))
    }

    /// Open an existing file repository for appending.
    pub fn open(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let filename = filename.as_ref();
        let path = base_dir.as_ref().join(filename);

        let file = OpenOptions::new().append(true).open(&path)?;
        let current_offset = file.metadata()?.len();

        tracing::debug!(
            "Opened repository: {} at offset {}",
            path.display(),
            current_offset
        );

        Ok(Self::from_parts(filename, path, file, current_offset))
    }

    /// Open or create a file repository.
    ///
    /// Creates the directory and file if they don't exist.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let filename = filename.as_ref();
        let path = base_dir.join(filename);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let current_offset = file.metadata()?.len();

        tracing::debug!(
            "Opened/created repository: {} at offset {}",
            path.display(),
            current_offset
        );

        Ok(Self::from_parts(filename, path, file, current_offset))
    }

    fn from_parts(filename: &str, path: PathBuf, file: File, current_offset: u64) -> Self {
        Self {
            session_id: filename.to_string(),
            path,
            writer: BufWriter::with_capacity(WRITE_BUFFER, file),
            current_offset,
            _phantom: PhantomData,
        }
    }

    /// Append an item to the log.
    ///
    /// Returns the byte offset where the item was written.
    pub fn append(&mut self, item: &T) -> Result<u64> {
        let offset = self.current_offset;

        let bytes = bincode::serialize(item).map_err(|e| RepositoryError::Encode(e.to_string()))?;
        let len = u32::try_from(bytes.len()).map_err(|_| {
            RepositoryError::Encode(format!("frame of {} bytes too large", bytes.len()))
        })?;

        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.current_offset += 4 + bytes.len() as u64;

        Ok(offset)
    }

    /// Read an item at a specific byte offset.
    ///
    /// Returns `None` at the end of the file, otherwise the item and the offset
    /// of the next frame. Only flushed frames are visible.
    pub fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(T, u64)>> {
        read_frame(&self.path, byte_offset)
    }

    /// Every flushed item in append order.
    pub fn read_all(&self) -> Result<Vec<T>> {
        read_log_file(&self.path)
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get the current size of the log in bytes.
    pub fn size(&self) -> u64 {
        self.current_offset
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Drop for FileRepository<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(
                "Failed to flush repository '{}' on drop: {}",
                self.session_id,
                e
            );
        }
    }
}

/// Reads every frame of a log file without opening it for writing.
pub fn read_log_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut offset = 0;
    while let Some((item, next)) = read_frame(path, offset)? {
        items.push(item);
        offset = next;
    }
    Ok(items)
}

fn read_frame<T: DeserializeOwned>(path: &Path, byte_offset: u64) -> Result<Option<(T, u64)>> {
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();

    if byte_offset == file_size {
        return Ok(None);
    }
    if byte_offset > file_size {
        return Err(RepositoryError::OffsetPastEnd {
            offset: byte_offset,
            file_size,
        });
    }

    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(byte_offset))?;

    let mut len_bytes = [0u8; 4];
    read_exact_or_corrupt(&mut reader, &mut len_bytes, byte_offset)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let mut data = vec![0u8; len];
    read_exact_or_corrupt(&mut reader, &mut data, byte_offset)?;

    let item = bincode::deserialize(&data).map_err(|e| RepositoryError::Decode {
        offset: byte_offset,
        reason: e.to_string(),
    })?;

    Ok(Some((item, byte_offset + 4 + len as u64)))
}

fn read_exact_or_corrupt(reader: &mut impl Read, buf: &mut [u8], offset: u64) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => RepositoryError::TruncatedFrame { offset },
        _ => RepositoryError::Io(e),
    })
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl ActionLog for FileRepository<ActionLogEntry> {
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        self.append(entry)
    }

    fn read_all(&self) -> Result<Vec<ActionLogEntry>> {
        self.read_all()
    }

    fn flush(&mut self) -> Result<()> {
        self.flush()
    }

    fn size(&self) -> Result<u64> {
        Ok(self.size())
    }

    fn session_id(&self) -> &str {
        self.session_id()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{ActionKind, ActionRef, EntityId, ExecutionRecord, Tick};
    use tempfile::TempDir;

    fn entry(nonce: u64) -> ActionLogEntry {
        ActionLogEntry::new(
            nonce,
            Tick(nonce * 10),
            ExecutionRecord::new(
                EntityId(1),
                EntityId(2),
                ActionRef::new(ActionKind::BasicAttack, "Claw"),
            ),
        )
    }

    #[test]
    fn test_append_and_read_at_offset() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileActionLog::create(temp_dir.path(), "actions.log").unwrap();

        let offset1 = repo.append(&entry(0)).unwrap();
        let offset2 = repo.append(&entry(1)).unwrap();
        repo.flush().unwrap();

        assert_eq!(offset1, 0);
        let (read1, next1) = repo.read_at_offset(offset1).unwrap().unwrap();
        let (read2, next2) = repo.read_at_offset(offset2).unwrap().unwrap();
        assert_eq!(read1, entry(0));
        assert_eq!(read2, entry(1));
        assert_eq!(next1, offset2);
        assert_eq!(next2, repo.size());
        assert!(repo.read_at_offset(next2).unwrap().is_none());
        assert!(matches!(
            repo.read_at_offset(next2 + 100),
            Err(RepositoryError::OffsetPastEnd { .. })
        ));
    }

    #[test]
    fn test_create_refuses_existing_log() {
        let temp_dir = TempDir::new().unwrap();
        FileActionLog::create(temp_dir.path(), "actions.log").unwrap();
        assert!(matches!(
            FileActionLog::create(temp_dir.path(), "actions.log"),
            Err(RepositoryError::LogExists(_))
        ));
    }

    #[test]
    fn test_open_existing_appends() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut repo = FileActionLog::create(temp_dir.path(), "actions.log").unwrap();
            repo.append(&entry(0)).unwrap();
        }
        {
            let mut repo = FileActionLog::open(temp_dir.path(), "actions.log").unwrap();
            assert!(repo.size() > 0);
            repo.append(&entry(1)).unwrap();
        }

        let entries: Vec<ActionLogEntry> =
            read_log_file(&temp_dir.path().join("actions.log")).unwrap();
        assert_eq!(entries, vec![entry(0), entry(1)]);
    }

    #[test]
    fn test_truncated_frame_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("actions.log");
        {
            let mut repo = FileActionLog::open_or_create(temp_dir.path(), "actions.log").unwrap();
            repo.append(&entry(0)).unwrap();
        }
        let len = std::fs::metadata(&path).unwrap().len();
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(len - 3).unwrap();

        assert!(matches!(
            read_log_file::<ActionLogEntry>(&path),
            Err(RepositoryError::TruncatedFrame { offset: 0 })
        ));
    }
}
