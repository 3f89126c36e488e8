//! # Single-assignment result cell.
//!
//! This module provides the result-handoff side of the toolkit:
//! - [`ResultFuture`] - cloneable cell resolved exactly once with a value or an error,
//!   readable with blocking or timed retrieval

mod result_future;

pub use result_future::ResultFuture;
