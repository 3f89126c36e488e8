//! # threadkit
//!
//! **Threadkit** is a small toolkit of thread-coordination primitives for Rust.
//!
//! It provides three independent, composable building blocks for moving work
//! and results between real threads without silent deadlocks or lost signals.
//! The crate is designed as a leaf dependency for multi-threaded middleware.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  Producers (any threads)            Consumers (any threads)
//!  ────────────────────────           ───────────────────────
//!    push() ──────────► ┌─────────────┐ ◄────────── pop() [blocks]
//!    (never blocks,     │  SyncQueue  │             try_pop()
//!     evicts oldest     │  FIFO+cap   │ ◄────────── interrupt()
//!     on overflow)      └─────────────┘             (one-shot shutdown)
//!
//!    set(value) ──────► ┌──────────────┐ ◄───────── get() [blocks]
//!    set_error(msg) ──► │ ResultFuture │            get_timeout(d)
//!    (first one wins)   │ 1-shot cell  │ ◄───────── is_done()
//!                       └──────────────┘
//!
//!                       ┌─────────────────┐
//!    cancel() ────────► │ CancellableTask │──► dedicated worker thread:
//!    wait_done() ◄────── │  + CyclePolicy  │    loop { pre; delegate(ctx); post }
//!    join()             └─────────────────┘    until policy/cancel says stop
//! ```
//!
//! None of the three primitives depends on another; a caller may combine them
//! (a worker pulls from a queue inside a cancellable task loop and publishes
//! its outcome through a future), but the toolkit imposes no composition.
//!
//! Each primitive owns exactly one internal lock and never takes another
//! primitive's lock. All state mutation happens under that lock, and condvar
//! signaling always follows the mutation waiters are checking for.
//!
//! ## Features
//! | Area            | Description                                                      | Key types / traits                       |
//! |-----------------|------------------------------------------------------------------|------------------------------------------|
//! | **Queueing**    | Bounded, interruptible FIFO with eviction-on-overflow.           | [`SyncQueue`], [`QueueBuilder`]          |
//! | **Futures**     | Single-assignment result cell with blocking/timed retrieval.     | [`ResultFuture`]                         |
//! | **Tasks**       | Cancellable worker threads with a pluggable continuation policy. | [`CancellableTask`], [`CyclePolicy`]     |
//! | **Errors**      | Typed, matchable outcomes of blocking calls.                     | [`QueueError`], [`FutureError`]          |
//! | **Diagnostics** | Optional leveled trace sink; silence by default.                 | [`DiagnosticSink`], [`Level`]            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//! - `tracing`: exports [`TracingSink`], bridging diagnostics into `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use threadkit::{CancellableTask, QueueError, ResultFuture, SyncQueue};
//!
//! // A bounded queue: producers never block, stale items are evicted.
//! let queue = Arc::new(SyncQueue::bounded(64));
//! let future = ResultFuture::new();
//!
//! // Worker: drain the queue until interrupted, publish the sum once.
//! let (work, result) = (Arc::clone(&queue), future.clone());
//! let worker = CancellableTask::spawn("summer", move |_ctx| {
//!     let mut sum = 0u64;
//!     loop {
//!         match work.pop() {
//!             Ok(n) => sum += n,
//!             Err(QueueError::Interrupted) => break,
//!             Err(_) => break,
//!         }
//!     }
//!     result.set(sum);
//! });
//!
//! for n in 1..=10 {
//!     queue.push(n);
//! }
//!
//! // Teardown: wait for the backlog to drain (interruption outranks queued
//! // items), then interrupt and collect the outcome with a bounded wait.
//! while !queue.is_empty() {
//!     std::thread::sleep(Duration::from_millis(1));
//! }
//! queue.interrupt();
//! assert_eq!(future.get_timeout(Duration::from_secs(5)), Ok(55));
//! worker.wait_done();
//! ```

mod diag;
mod error;
mod future;
mod queue;
mod tasks;

// ---- Public re-exports ----

pub use diag::{DiagnosticSink, Level, SinkRef};
pub use error::{FutureError, QueueError};
pub use future::ResultFuture;
pub use queue::{QueueBuilder, SyncQueue};
pub use tasks::{CancellableTask, CyclePolicy, FixedInterval, RunOnce, TaskBuilder, TaskContext};

// Optional: expose a simple built-in stdout sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use diag::LogWriter;

// Optional: bridge diagnostics into the `tracing` ecosystem.
// Enable with: `--features tracing`
#[cfg(feature = "tracing")]
pub use diag::TracingSink;
