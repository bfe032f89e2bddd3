//! Writer metrics for observability
//!
//! Counters for monitoring writer health: accepted lines, flushed bytes,
//! flush failures, and overflow events.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for writer observability
///
/// # Example
///
/// ```
/// use async_line_logger::WriterMetrics;
///
/// let metrics = WriterMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_flush(64);
///
/// assert_eq!(metrics.lines_logged(), 1);
/// assert_eq!(metrics.bytes_flushed(), 64);
/// ```
#[derive(Debug)]
pub struct WriterMetrics {
    /// Lines accepted into the buffer (or written directly by the sync writer)
    lines_logged: AtomicU64,

    /// Bytes successfully written to the sink
    bytes_flushed: AtomicU64,

    /// Flush attempts that failed and left the buffer intact
    flush_failures: AtomicU64,

    /// Lines discarded by the DropNewest/DropOldest policies
    lines_dropped: AtomicU64,

    /// Times a producer blocked waiting for buffer space
    block_events: AtomicU64,
}

impl WriterMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            lines_logged: AtomicU64::new(0),
            bytes_flushed: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
            lines_dropped: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    /// Get the number of lines accepted
    #[inline]
    pub fn lines_logged(&self) -> u64 {
        self.lines_logged.load(Ordering::Relaxed)
    }

    /// Get the number of bytes written to the sink
    #[inline]
    pub fn bytes_flushed(&self) -> u64 {
        self.bytes_flushed.load(Ordering::Relaxed)
    }

    /// Get the number of failed flush attempts
    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    /// Get the number of dropped lines
    #[inline]
    pub fn lines_dropped(&self) -> u64 {
        self.lines_dropped.load(Ordering::Relaxed)
    }

    /// Get the number of blocking events
    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    /// Record an accepted line
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.lines_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a successful flush of `bytes` bytes
    #[inline]
    pub fn record_flush(&self, bytes: usize) -> u64 {
        self.bytes_flushed.fetch_add(bytes as u64, Ordering::Relaxed)
    }

    /// Record a failed flush attempt
    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped line, returning the previous drop count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.lines_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a blocking event
    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no lines have been submitted.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.lines_dropped() as f64;
        let total = self.lines_logged() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.lines_logged.store(0, Ordering::Relaxed);
        self.bytes_flushed.store(0, Ordering::Relaxed);
        self.flush_failures.store(0, Ordering::Relaxed);
        self.lines_dropped.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

impl Default for WriterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WriterMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            lines_logged: AtomicU64::new(self.lines_logged()),
            bytes_flushed: AtomicU64::new(self.bytes_flushed()),
            flush_failures: AtomicU64::new(self.flush_failures()),
            lines_dropped: AtomicU64::new(self.lines_dropped()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = WriterMetrics::new();
        assert_eq!(metrics.lines_logged(), 0);
        assert_eq!(metrics.bytes_flushed(), 0);
        assert_eq!(metrics.flush_failures(), 0);
        assert_eq!(metrics.lines_dropped(), 0);
        assert_eq!(metrics.block_events(), 0);
    }

    #[test]
    fn test_metrics_record() {
        let metrics = WriterMetrics::new();
        assert_eq!(metrics.record_dropped(), 0); // Returns previous value
        assert_eq!(metrics.lines_dropped(), 1);

        metrics.record_logged();
        metrics.record_logged();
        assert_eq!(metrics.lines_logged(), 2);

        metrics.record_flush(10);
        metrics.record_flush(22);
        assert_eq!(metrics.bytes_flushed(), 32);
    }

    #[test]
    fn test_metrics_drop_rate() {
        let metrics = WriterMetrics::new();

        // No lines - 0% drop rate
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_logged();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }

        // 10 out of 100 = 10%
        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = WriterMetrics::new();
        metrics.record_logged();
        metrics.record_flush(8);
        metrics.record_flush_failure();

        metrics.reset();

        assert_eq!(metrics.lines_logged(), 0);
        assert_eq!(metrics.bytes_flushed(), 0);
        assert_eq!(metrics.flush_failures(), 0);
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = WriterMetrics::new();
        metrics.record_dropped();
        metrics.record_logged();
        metrics.record_logged();

        let snapshot = metrics.clone();
        assert_eq!(snapshot.lines_dropped(), 1);
        assert_eq!(snapshot.lines_logged(), 2);

        // Original and clone are independent
        metrics.record_dropped();
        assert_eq!(metrics.lines_dropped(), 2);
        assert_eq!(snapshot.lines_dropped(), 1);
    }
}
