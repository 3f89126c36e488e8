//! # Interruptible bounded FIFO queue.
//!
//! This module provides the producer/consumer side of the toolkit:
//! - [`SyncQueue`] - thread-safe FIFO with optional capacity and eviction callback
//! - [`QueueBuilder`] - construction-time options (capacity, eviction, diagnostics)

mod builder;
mod sync_queue;

pub use builder::QueueBuilder;
pub use sync_queue::SyncQueue;
