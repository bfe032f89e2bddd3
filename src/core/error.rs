//! Error types for the line writers

pub type Result<T> = std::result::Result<T, WriterError>;

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// Destination could not be created or truncated
    #[error("cannot create log destination '{path}': {source}")]
    CannotCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Sink write failed during a flush; buffered bytes are retained
    #[error("write to log destination failed: {source}")]
    WriteFailed {
        #[source]
        source: std::io::Error,
    },

    /// In-memory buffer append failed (allocation failure)
    #[error("buffer append failed: {0}")]
    BufferWriteFailed(String),

    /// Lines were discarded because the buffer capacity was exceeded
    #[error("buffer full: {dropped} lines dropped")]
    BufferOverflow { dropped: u64 },

    /// Shutdown failure while releasing the destination
    #[error("close of log destination failed: {source}")]
    CloseFailed {
        #[source]
        source: std::io::Error,
    },

    /// Operation on a writer whose close already completed or began
    #[error("writer already closed")]
    AlreadyClosed,
}

impl WriterError {
    /// Create a destination-creation error for `path`
    pub fn cannot_create(path: impl Into<String>, source: std::io::Error) -> Self {
        WriterError::CannotCreate {
            path: path.into(),
            source,
        }
    }

    /// Create a flush write error
    pub fn write_failed(source: std::io::Error) -> Self {
        WriterError::WriteFailed { source }
    }

    /// Create a buffer append error
    pub fn buffer_write<S: Into<String>>(msg: S) -> Self {
        WriterError::BufferWriteFailed(msg.into())
    }

    /// Create an overflow report with the total dropped-line count
    pub fn buffer_overflow(dropped: u64) -> Self {
        WriterError::BufferOverflow { dropped }
    }

    /// Create a shutdown error
    pub fn close_failed(source: std::io::Error) -> Self {
        WriterError::CloseFailed { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = WriterError::cannot_create("/var/log/app.log", io_err);
        assert!(matches!(err, WriterError::CannotCreate { .. }));

        let err = WriterError::buffer_overflow(42);
        assert!(matches!(err, WriterError::BufferOverflow { dropped: 42 }));

        let err = WriterError::buffer_write("allocation failed");
        assert!(matches!(err, WriterError::BufferWriteFailed(_)));
    }

    #[test]
    fn test_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = WriterError::cannot_create("/var/log/app.log", io_err);
        assert_eq!(
            err.to_string(),
            "cannot create log destination '/var/log/app.log': access denied"
        );

        let err = WriterError::buffer_overflow(1000);
        assert_eq!(err.to_string(), "buffer full: 1000 lines dropped");

        assert_eq!(WriterError::AlreadyClosed.to_string(), "writer already closed");
    }

    #[test]
    fn test_write_failed_source() {
        let io_err = std::io::Error::other("no space left on device");
        let err = WriterError::write_failed(io_err);

        assert!(matches!(err, WriterError::WriteFailed { .. }));
        assert!(err.to_string().contains("no space left on device"));
    }
}
