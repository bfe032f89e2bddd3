//! Worker logging demo
//!
//! Two periodic producer workers share one buffered writer through the
//! `LineLogger` capability, then the writer is drained and closed.
//!
//! Run with: cargo run --example worker_logging

use async_line_logger::{AsyncFileWriter, LineLogger, Result};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn worker(name: &str, logger: Arc<dyn LineLogger>) {
    for i in 0..5 {
        if let Err(e) = logger.log(&format!("{} logging {}", name, i)) {
            eprintln!("{}: log failed: {}", name, e);
        }
        thread::sleep(Duration::from_millis(200));
    }
}

fn main() -> Result<()> {
    println!("=== Async Line Logger - Worker Example ===\n");

    let writer = Arc::new(AsyncFileWriter::create("workers.log")?);

    let mut handles = vec![];
    for name in ["worker1", "worker2"] {
        let logger: Arc<dyn LineLogger> = writer.clone();
        handles.push(thread::spawn(move || worker(name, logger)));
    }

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    writer.close()?;

    let metrics = writer.metrics();
    println!("Lines logged:  {}", metrics.lines_logged());
    println!("Bytes flushed: {}", metrics.bytes_flushed());

    println!("\n=== Done, check 'workers.log' ===");
    Ok(())
}
