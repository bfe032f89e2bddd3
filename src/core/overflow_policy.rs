//! Overflow policies for the bounded write buffer
//!
//! When a buffer capacity is configured and a new line would exceed it,
//! these policies determine what happens to prevent silent log loss.

use std::fmt;
use std::sync::Arc;

use super::error::WriterError;

/// Policy for handling buffer overflow in the asynchronous writer
///
/// Only consulted when [`WriterConfig::max_buffer_bytes`] is set; with an
/// unbounded buffer the policy never engages.
///
/// [`WriterConfig::max_buffer_bytes`]: super::config::WriterConfig
///
/// # Example
///
/// ```
/// use async_line_logger::OverflowPolicy;
///
/// // Default behavior: block until a flush makes room
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::Block);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Discard the incoming line when the buffer is full
    ///
    /// Drops are counted in metrics and reported through the error sink.
    /// Use this for high-throughput scenarios where some loss is acceptable.
    DropNewest,

    /// Evict the oldest buffered lines to make room for the new one
    ///
    /// Eviction removes whole lines only; a record is never truncated.
    DropOldest,

    /// Wait until a successful flush makes room
    ///
    /// Never loses data, at the cost of backpressure on producers. A writer
    /// whose destination stays unwritable can stall producers indefinitely.
    Block,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::Block
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
            OverflowPolicy::Block => write!(f, "Block"),
        }
    }
}

/// Callback type for operational error reports
///
/// Invoked by the flush thread on write failures and by `log` when lines are
/// dropped due to overflow. When no callback is configured, reports go to
/// stderr instead.
pub type ErrorCallback = Arc<dyn Fn(&WriterError) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_policy_default() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
    }

    #[test]
    fn test_overflow_policy_display() {
        assert_eq!(OverflowPolicy::DropNewest.to_string(), "DropNewest");
        assert_eq!(OverflowPolicy::DropOldest.to_string(), "DropOldest");
        assert_eq!(OverflowPolicy::Block.to_string(), "Block");
    }
}
