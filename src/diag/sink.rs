//! # Core diagnostic sink trait
//!
//! `DiagnosticSink` is the extension point for routing toolkit lifecycle traces
//! (push/pop, evictions, cancel requests, cycle start/end) into whatever logging
//! infrastructure the host application uses.
//!
//! ## Contract
//! - `log` is called synchronously from the thread performing the traced
//!   operation, **outside** the primitive's internal lock. Implementations
//!   should be quick; anything slow belongs behind a buffer of their own.
//! - Sinks are optional everywhere. Absence removes diagnostics, never behavior.
//!
//! ## Example (skeleton)
//! ```rust
//! use threadkit::{DiagnosticSink, Level};
//!
//! struct Stderr;
//!
//! impl DiagnosticSink for Stderr {
//!     fn log(&self, level: Level, message: &str) {
//!         eprintln!("[{}] {message}", level.as_label());
//!     }
//!     fn name(&self) -> &'static str { "stderr" }
//! }
//! ```

use std::sync::Arc;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Fine-grained operation traces (every push/pop/cycle).
    Trace,
    /// Per-cycle and per-wait details.
    Debug,
    /// Lifecycle milestones (loop finished, queue interrupted).
    Info,
    /// Suspicious but non-fatal usage (double resolution of a future).
    Warn,
    /// Reserved for sink implementations; the toolkit itself never emits it.
    Error,
}

impl Level {
    /// Returns a short stable label (lowercase) for use in output formats.
    ///
    /// # Example
    /// ```
    /// use threadkit::Level;
    ///
    /// assert_eq!(Level::Warn.as_label(), "warn");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// Contract for diagnostic sinks.
///
/// Called from whichever thread performs the traced operation. Implementations
/// must be thread-safe; the same sink may receive messages from producers,
/// consumers and worker threads concurrently.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Handle a single leveled message.
    fn log(&self, level: Level, message: &str);

    /// Human-readable sink name (for nested routing/debugging).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared reference to a diagnostic sink.
pub type SinkRef = Arc<dyn DiagnosticSink>;
