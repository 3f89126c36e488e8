//! # Simple logging sink for debugging and demos.
//!
//! [`LogWriter`] prints diagnostics to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [trace] queue=events push len=3
//! [debug] task=poller cycle done elapsed=1.2ms
//! [info] queue=events interrupted
//! [warn] future already resolved; set ignored
//! ```
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use threadkit::{LogWriter, SyncQueue};
//!
//! let queue: SyncQueue<u32> = SyncQueue::builder()
//!     .sink(Arc::new(LogWriter::default()))
//!     .build();
//! queue.push(1); // traced to stdout
//! ```

use crate::diag::sink::{DiagnosticSink, Level};

/// Simple stdout logging sink.
///
/// Enabled via the `logging` feature. Prints every message at or above
/// [`LogWriter::threshold`] for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`DiagnosticSink`] for
/// structured logging or metrics collection.
pub struct LogWriter {
    /// Minimum level that gets printed. Defaults to [`Level::Trace`].
    pub threshold: Level,
}

impl Default for LogWriter {
    fn default() -> Self {
        Self {
            threshold: Level::Trace,
        }
    }
}

impl LogWriter {
    /// Creates a writer that only prints messages at `threshold` or above.
    pub fn with_threshold(threshold: Level) -> Self {
        Self { threshold }
    }
}

impl DiagnosticSink for LogWriter {
    fn log(&self, level: Level, message: &str) {
        if level >= self.threshold {
            println!("[{}] {message}", level.as_label());
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
