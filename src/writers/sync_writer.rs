//! Unbuffered line writer

use super::sink::FileSink;
use crate::core::{LineLogger, Result, WriterError, WriterMetrics};
use parking_lot::Mutex;
use std::path::PathBuf;

/// A line writer that hits the destination on every call
///
/// Each [`log`] acquires the lock and writes `message + "\n"` straight to the
/// sink, so callers pay the I/O cost inline. Use [`AsyncFileWriter`] when
/// producers must not block on disk.
///
/// [`log`]: SyncFileWriter::log
/// [`AsyncFileWriter`]: super::AsyncFileWriter
pub struct SyncFileWriter {
    // None once closed
    sink: Mutex<Option<FileSink>>,
    path: PathBuf,
    metrics: WriterMetrics,
}

impl std::fmt::Debug for SyncFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncFileWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SyncFileWriter {
    /// Create or truncate the destination at `path`
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::CannotCreate`] if the destination cannot be
    /// opened.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let sink = FileSink::create(&path)?;

        Ok(Self {
            sink: Mutex::new(Some(sink)),
            path,
            metrics: WriterMetrics::new(),
        })
    }

    /// Write `message` as one newline-terminated record
    pub fn log(&self, message: &str) -> Result<()> {
        let mut guard = self.sink.lock();
        let sink = guard.as_mut().ok_or(WriterError::AlreadyClosed)?;

        let mut line = Vec::with_capacity(message.len() + 1);
        line.extend_from_slice(message.as_bytes());
        line.push(b'\n');

        sink.write_all(&line)?;
        self.metrics.record_logged();
        self.metrics.record_flush(line.len());
        Ok(())
    }

    /// Release the destination
    pub fn close(&self) -> Result<()> {
        let sink = self.sink.lock().take().ok_or(WriterError::AlreadyClosed)?;
        sink.close()
    }

    /// Get the destination path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Get the writer metrics
    pub fn metrics(&self) -> &WriterMetrics {
        &self.metrics
    }
}

impl LineLogger for SyncFileWriter {
    fn log(&self, message: &str) -> Result<()> {
        SyncFileWriter::log(self, message)
    }

    fn close(&self) -> Result<()> {
        SyncFileWriter::close(self)
    }
}
