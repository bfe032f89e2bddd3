//! Writer implementations

pub mod async_writer;
pub mod sink;
pub mod sync_writer;

pub use async_writer::AsyncFileWriter;
pub use sink::FileSink;
pub use sync_writer::SyncFileWriter;
