//! # Example: periodic_poll
//!
//! A periodic task polling a source every 200ms with diagnostics printed by
//! the built-in [`LogWriter`] sink.
//!
//! Demonstrates how to:
//! - Build a periodic worker with [`FixedInterval`].
//! - Attach a [`DiagnosticSink`] to trace cycle start/end and cancellation.
//! - Cancel mid-sleep and observe prompt termination.
//!
//! ## Run
//! ```bash
//! cargo run --example periodic_poll --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use threadkit::{CancellableTask, FixedInterval, Level, LogWriter};

fn main() {
    let sink = Arc::new(LogWriter::with_threshold(Level::Debug));

    let task = CancellableTask::builder("poller")
        .policy(FixedInterval::new(Duration::from_millis(200)))
        .sink(sink)
        .spawn(|ctx| {
            println!("[{}] polling...", ctx.name());
        });

    // Let a few cycles run, then cancel while the worker sleeps. The task
    // terminates within a scheduling quantum, not after the stale interval.
    std::thread::sleep(Duration::from_millis(700));
    task.cancel();
    task.wait_done();
    println!("[main] poller stopped");
}
