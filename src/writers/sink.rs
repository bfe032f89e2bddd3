//! The owned destination handle that receives flushed bytes

use crate::core::{Result, WriterError};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An exclusively-owned, writable file destination
///
/// Created (truncating any previous contents) on construction and released
/// exactly once by [`close`], which consumes the sink so a second close does
/// not typecheck. Exactly one writer owns a sink at a time.
///
/// [`close`]: FileSink::close
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Create or truncate the destination at `path`
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::CannotCreate`] if the file cannot be created
    /// (permissions, invalid path, disk full).
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path)
            .map_err(|e| WriterError::cannot_create(path.display().to_string(), e))?;

        Ok(Self { file, path })
    }

    /// Append raw bytes to the destination
    ///
    /// Partial writes are retried until everything is written or an error
    /// occurs.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes).map_err(WriterError::write_failed)
    }

    /// Release the handle
    ///
    /// Consumes the sink; the owner calls this exactly once.
    pub fn close(mut self) -> Result<()> {
        self.file.flush().map_err(WriterError::close_failed)
    }

    /// Get the destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sink_create_write_close() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("sink.log");

        let mut sink = FileSink::create(&path).expect("Failed to create sink");
        assert_eq!(sink.path(), path.as_path());

        sink.write_all(b"hello\n").expect("Failed to write");
        sink.write_all(b"world\n").expect("Failed to write");
        sink.close().expect("Failed to close");

        let content = std::fs::read_to_string(&path).expect("Failed to read back");
        assert_eq!(content, "hello\nworld\n");
    }

    #[test]
    fn test_sink_create_truncates() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("sink.log");
        std::fs::write(&path, "stale contents\n").expect("Failed to seed file");

        let sink = FileSink::create(&path).expect("Failed to create sink");
        sink.close().expect("Failed to close");

        let content = std::fs::read_to_string(&path).expect("Failed to read back");
        assert!(content.is_empty(), "create should truncate, got {:?}", content);
    }

    #[test]
    fn test_sink_create_invalid_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("no_such_dir").join("sink.log");

        let err = FileSink::create(&path).expect_err("create should fail");
        assert!(matches!(err, WriterError::CannotCreate { .. }));
        assert!(err.to_string().contains("no_such_dir"));
    }
}
