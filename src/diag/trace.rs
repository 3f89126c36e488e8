//! # Bridge sink into the `tracing` ecosystem.
//!
//! [`TracingSink`] forwards toolkit diagnostics to [`tracing`] events so they
//! flow through whatever subscriber the host application has installed
//! (`tracing-subscriber` fmt layers, JSON output, spans, filtering).
//!
//! Enabled via the `tracing` feature.

use crate::diag::sink::{DiagnosticSink, Level};

/// Forwards each `(level, message)` pair to the corresponding `tracing` macro.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Trace => tracing::trace!(target: "threadkit", "{message}"),
            Level::Debug => tracing::debug!(target: "threadkit", "{message}"),
            Level::Info => tracing::info!(target: "threadkit", "{message}"),
            Level::Warn => tracing::warn!(target: "threadkit", "{message}"),
            Level::Error => tracing::error!(target: "threadkit", "{message}"),
        }
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
