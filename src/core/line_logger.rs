//! The capability trait writers expose to producers

use super::error::Result;

/// A destination for log lines
///
/// The only surface producers see. Both the unbuffered [`SyncFileWriter`] and
/// the buffered [`AsyncFileWriter`] satisfy it, so callers stay agnostic to
/// which one is behind their `Arc<dyn LineLogger>`.
///
/// [`SyncFileWriter`]: crate::writers::SyncFileWriter
/// [`AsyncFileWriter`]: crate::writers::AsyncFileWriter
pub trait LineLogger: Send + Sync {
    /// Append `message` as one newline-terminated record
    ///
    /// Safe to call from any number of threads. The message's bytes appear in
    /// the destination atomically and contiguously; ordering across callers
    /// is scheduler-determined.
    fn log(&self, message: &str) -> Result<()>;

    /// Drain anything pending and release the destination
    ///
    /// Exactly one call succeeds; later calls (and any `log` after close has
    /// begun) return [`WriterError::AlreadyClosed`].
    ///
    /// [`WriterError::AlreadyClosed`]: super::error::WriterError::AlreadyClosed
    fn close(&self) -> Result<()>;
}
