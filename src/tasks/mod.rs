//! # Cancellable worker tasks.
//!
//! This module provides the worker-thread side of the toolkit:
//! - [`CancellableTask`] - owns a thread repeatedly running a delegate until cancelled
//! - [`TaskContext`] - the handle a delegate receives to inspect/request cancellation
//! - [`CyclePolicy`] - the continuation seam deciding whether the loop runs again
//! - [`RunOnce`] / [`FixedInterval`] - stop after one cycle vs. periodic execution
//! - [`TaskBuilder`] - hooks, policy and diagnostics at construction time

mod builder;
mod context;
mod policy;
mod task;

pub use builder::TaskBuilder;
pub use context::TaskContext;
pub use policy::{CyclePolicy, FixedInterval, RunOnce};
pub use task::CancellableTask;
