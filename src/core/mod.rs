//! Core writer types and traits

pub mod config;
pub mod error;
pub mod line_logger;
pub mod metrics;
pub mod overflow_policy;

pub use config::{WriterConfig, DEFAULT_FLUSH_INTERVAL};
pub use error::{Result, WriterError};
pub use line_logger::LineLogger;
pub use metrics::WriterMetrics;
pub use overflow_policy::{ErrorCallback, OverflowPolicy};
