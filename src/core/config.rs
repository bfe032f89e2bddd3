//! Configuration for the asynchronous writer

use std::time::Duration;

use super::overflow_policy::{ErrorCallback, OverflowPolicy};

/// Default interval between background flush attempts (50 ms)
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for [`AsyncFileWriter`]
///
/// [`AsyncFileWriter`]: crate::writers::AsyncFileWriter
///
/// # Example
///
/// ```
/// use async_line_logger::{OverflowPolicy, WriterConfig};
/// use std::time::Duration;
///
/// let config = WriterConfig::new()
///     .with_flush_interval(Duration::from_millis(10))
///     .with_max_buffer_bytes(64 * 1024)
///     .with_overflow_policy(OverflowPolicy::DropOldest);
/// ```
#[derive(Clone, Default)]
pub struct WriterConfig {
    pub(crate) flush_interval: Option<Duration>,
    pub(crate) max_buffer_bytes: Option<usize>,
    pub(crate) overflow_policy: OverflowPolicy,
    pub(crate) on_error: Option<ErrorCallback>,
}

impl WriterConfig {
    /// Create a configuration with default values
    ///
    /// Defaults: flush every [`DEFAULT_FLUSH_INTERVAL`], unbounded buffer,
    /// [`OverflowPolicy::Block`], error reports to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interval between background flush attempts
    ///
    /// The flush thread wakes on this interval or on the stop signal,
    /// whichever comes first.
    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = Some(interval);
        self
    }

    /// Cap the in-memory buffer at `bytes`
    ///
    /// Without a cap the buffer grows without bound while the destination is
    /// unwritable. With one, the overflow policy decides what happens when a
    /// new line would exceed it.
    #[must_use]
    pub fn with_max_buffer_bytes(mut self, bytes: usize) -> Self {
        self.max_buffer_bytes = Some(bytes);
        self
    }

    /// Set the policy applied when the buffer cap would be exceeded
    #[must_use]
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Install a callback for operational error reports
    ///
    /// Receives flush failures and overflow drops that are not surfaced to
    /// producers. Replaces the default stderr output.
    ///
    /// # Example
    ///
    /// ```
    /// use async_line_logger::WriterConfig;
    /// use std::sync::Arc;
    ///
    /// let config = WriterConfig::new().with_error_callback(Arc::new(|err| {
    ///     eprintln!("writer trouble: {}", err);
    /// }));
    /// ```
    #[must_use]
    pub fn with_error_callback(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    pub(crate) fn flush_interval(&self) -> Duration {
        self.flush_interval.unwrap_or(DEFAULT_FLUSH_INTERVAL)
    }
}
