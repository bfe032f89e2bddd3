//! Buffered asynchronous line writer
//!
//! Producers append to an in-memory buffer under a mutex; a dedicated
//! background thread drains the buffer to the file on a fixed interval.
//! Producer threads never touch the disk.

use super::sink::FileSink;
use crate::core::{
    ErrorCallback, LineLogger, OverflowPolicy, Result, WriterConfig, WriterError, WriterMetrics,
};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::{Condvar, Mutex};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A line writer that buffers in memory and flushes in the background
///
/// [`log`] appends `message + "\n"` to the buffer and returns without any
/// sink I/O. A flush thread, started on construction, drains the buffer to
/// the file on every tick of the configured interval and exits when [`close`]
/// signals it. [`close`] performs the final drain itself before signaling,
/// so every line logged before `close` was invoked reaches the file by the
/// time `close` returns.
///
/// A failed flush keeps the buffered bytes for the next attempt; nothing is
/// lost silently, but an unwritable destination grows the buffer until a
/// capacity is configured via [`WriterConfig::with_max_buffer_bytes`].
///
/// [`log`]: AsyncFileWriter::log
/// [`close`]: AsyncFileWriter::close
///
/// # Example
///
/// ```no_run
/// use async_line_logger::AsyncFileWriter;
///
/// # fn main() -> async_line_logger::Result<()> {
/// let writer = AsyncFileWriter::create("app.log")?;
/// writer.log("service started")?;
/// writer.close()?;
/// # Ok(())
/// # }
/// ```
pub struct AsyncFileWriter {
    shared: Arc<Shared>,
    // Taken by the first close; empty afterwards
    control: Mutex<Option<FlushTask>>,
    path: PathBuf,
}

impl std::fmt::Debug for AsyncFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncFileWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

struct FlushTask {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

struct Shared {
    state: Mutex<BufferState>,
    // Signaled whenever a flush frees buffer space
    space: Condvar,
    metrics: WriterMetrics,
    max_buffer_bytes: Option<usize>,
    overflow_policy: OverflowPolicy,
    on_error: Option<ErrorCallback>,
}

struct BufferState {
    // Whole newline-terminated lines only, FIFO
    buffer: Vec<u8>,
    // None once close has taken it
    sink: Option<FileSink>,
    closed: bool,
}

impl Shared {
    fn flush(&self) {
        let mut state = self.state.lock();
        let _ = self.flush_locked(&mut state);
    }

    /// One flush attempt: write the whole buffer or keep it on failure
    fn flush_locked(&self, state: &mut BufferState) -> Result<()> {
        if state.buffer.is_empty() {
            return Ok(());
        }
        let Some(sink) = state.sink.as_mut() else {
            return Ok(());
        };

        match sink.write_all(&state.buffer) {
            Ok(()) => {
                self.metrics.record_flush(state.buffer.len());
                state.buffer.clear();
                self.space.notify_all();
                Ok(())
            }
            Err(e) => {
                // The unwritten bytes stay buffered for the next attempt
                self.metrics.record_flush_failure();
                self.report(&e);
                Err(e)
            }
        }
    }

    fn report(&self, err: &WriterError) {
        match &self.on_error {
            Some(callback) => callback(err),
            None => eprintln!("[WRITER ERROR] {}", err),
        }
    }

    fn record_drop(&self) {
        let total = self.metrics.record_dropped() + 1;
        // Alert on the first drop and every 1000th thereafter
        if total == 1 || total.is_multiple_of(1000) {
            self.report(&WriterError::buffer_overflow(total));
        }
    }
}

impl AsyncFileWriter {
    /// Create a writer on `path` with the default configuration
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::CannotCreate`] if the destination cannot be
    /// opened, in which case no flush thread is started.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(path, WriterConfig::default())
    }

    /// Create a writer on `path` with an explicit configuration
    ///
    /// The flush thread is running before this returns; there is no
    /// guarantee it has performed its first flush yet.
    pub fn with_config(path: impl Into<PathBuf>, config: WriterConfig) -> Result<Self> {
        let path = path.into();
        let sink = FileSink::create(&path)?;
        let flush_interval = config.flush_interval();

        let shared = Arc::new(Shared {
            state: Mutex::new(BufferState {
                buffer: Vec::new(),
                sink: Some(sink),
                closed: false,
            }),
            space: Condvar::new(),
            metrics: WriterMetrics::new(),
            max_buffer_bytes: config.max_buffer_bytes,
            overflow_policy: config.overflow_policy,
            on_error: config.on_error,
        });

        let (stop_tx, stop_rx) = bounded(1);
        let task_shared = Arc::clone(&shared);

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(flush_interval) {
                // Close drained the buffer before signaling; exit without
                // flushing again
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => task_shared.flush(),
            }
        });

        Ok(Self {
            shared,
            control: Mutex::new(Some(FlushTask { stop_tx, handle })),
            path,
        })
    }

    /// Append `message` as one newline-terminated record
    ///
    /// Never performs sink I/O. Concurrent calls are serialized by the lock;
    /// each call's bytes land in the buffer atomically and contiguously, but
    /// ordering across callers is scheduler-determined.
    ///
    /// # Errors
    ///
    /// [`WriterError::AlreadyClosed`] once `close` has begun;
    /// [`WriterError::BufferWriteFailed`] if the buffer cannot grow.
    pub fn log(&self, message: &str) -> Result<()> {
        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(WriterError::AlreadyClosed);
        }

        let needed = message.len() + 1;
        if let Some(cap) = self.shared.max_buffer_bytes {
            if state.buffer.len() + needed > cap {
                match self.shared.overflow_policy {
                    OverflowPolicy::DropNewest => {
                        self.shared.record_drop();
                        return Ok(());
                    }
                    OverflowPolicy::DropOldest => {
                        Self::evict_oldest(&self.shared, &mut state, needed, cap);
                    }
                    OverflowPolicy::Block => {
                        while state.buffer.len() + needed > cap && !state.closed {
                            self.shared.metrics.record_block();
                            self.shared.space.wait(&mut state);
                        }
                        if state.closed {
                            return Err(WriterError::AlreadyClosed);
                        }
                    }
                }
            }
        }

        state
            .buffer
            .try_reserve(needed)
            .map_err(|e| WriterError::buffer_write(e.to_string()))?;
        state.buffer.extend_from_slice(message.as_bytes());
        state.buffer.push(b'\n');
        self.shared.metrics.record_logged();
        Ok(())
    }

    /// Evict whole oldest lines until `needed` more bytes fit under `cap`
    ///
    /// A single line larger than the entire cap is let through; the cap is
    /// exceeded transiently rather than wedging the writer.
    fn evict_oldest(shared: &Shared, state: &mut BufferState, needed: usize, cap: usize) {
        while state.buffer.len() + needed > cap {
            let Some(end) = state.buffer.iter().position(|&b| b == b'\n') else {
                break;
            };
            state.buffer.drain(..=end);
            shared.record_drop();
        }
    }

    /// Drain the buffer, stop the flush thread, and release the destination
    ///
    /// The final flush happens on the calling thread before the stop signal
    /// is sent; the flush thread is joined before this returns, so no flush
    /// runs afterwards. Blocks until the flush thread exits; a wedged sink
    /// write can therefore hang shutdown.
    ///
    /// # Errors
    ///
    /// [`WriterError::AlreadyClosed`] on a second call;
    /// [`WriterError::WriteFailed`] if the final drain fails;
    /// [`WriterError::CloseFailed`] if the flush thread panicked or the sink
    /// could not be released.
    pub fn close(&self) -> Result<()> {
        let task = self.control.lock().take().ok_or(WriterError::AlreadyClosed)?;

        let (flush_result, sink) = {
            let mut state = self.shared.state.lock();
            state.closed = true;
            let flushed = self.shared.flush_locked(&mut state);
            (flushed, state.sink.take())
        };
        // Wake producers blocked on buffer space so they observe closed
        self.shared.space.notify_all();

        // One-shot stop; the task exits without another flush
        let _ = task.stop_tx.send(());
        let join_result = task.handle.join();

        let close_result = match sink {
            Some(sink) => sink.close(),
            None => Ok(()),
        };

        if join_result.is_err() {
            return Err(WriterError::close_failed(std::io::Error::other(
                "flush thread panicked",
            )));
        }
        flush_result?;
        close_result
    }

    /// Get the destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the writer metrics
    pub fn metrics(&self) -> &WriterMetrics {
        &self.shared.metrics
    }

    /// Get the number of bytes currently buffered and not yet flushed
    pub fn buffered_bytes(&self) -> usize {
        self.shared.state.lock().buffer.len()
    }
}

impl LineLogger for AsyncFileWriter {
    fn log(&self, message: &str) -> Result<()> {
        AsyncFileWriter::log(self, message)
    }

    fn close(&self) -> Result<()> {
        AsyncFileWriter::close(self)
    }
}

impl Drop for AsyncFileWriter {
    fn drop(&mut self) {
        // Best-effort drain and join if the caller never closed explicitly
        let _ = self.close();
    }
}
