//! # Diagnostic sink abstractions.
//!
//! This module provides the optional observability seam of the toolkit:
//! - [`DiagnosticSink`] - trait accepting leveled text messages
//! - [`Level`] - severity classification
//! - [`SinkRef`] - shared reference to a sink (`Arc<dyn DiagnosticSink>`)
//!
//! Sinks are attached at construction time (queue/task builders) and are purely
//! additive: a primitive without a sink behaves identically, it just says nothing.

mod sink;

pub use sink::{DiagnosticSink, Level, SinkRef};

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;

#[cfg(feature = "tracing")]
mod trace;
#[cfg(feature = "tracing")]
pub use trace::TracingSink;
