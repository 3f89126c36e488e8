//! # Example: worker_pipeline
//!
//! A producer thread, a bounded queue, a cancellable consumer worker, and a
//! future carrying the final tally back to `main`.
//!
//! Demonstrates how to:
//! - Combine the three primitives without any coupling between them.
//! - Shut a pipeline down with `interrupt()` and observe it in the consumer.
//! - Bound the wait for the outcome with `get_timeout`.
//!
//! ## Flow
//! ```text
//! main ──► queue.push(n) × 100
//!     └──► queue.interrupt()
//!
//! worker("adder") ──► loop { queue.pop() } ──► Err(Interrupted)
//!     └──► future.set(sum) ──► main: future.get_timeout()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example worker_pipeline
//! ```

use std::sync::Arc;
use std::time::Duration;

use threadkit::{CancellableTask, QueueError, ResultFuture, SyncQueue};

fn main() {
    let queue = Arc::new(SyncQueue::unbounded());
    let outcome = ResultFuture::new();

    // Consumer worker: drain until interrupted, then publish the sum.
    let drain = Arc::clone(&queue);
    let publish = outcome.clone();
    let worker = CancellableTask::spawn("adder", move |_ctx| {
        let mut sum: u64 = 0;
        loop {
            match drain.pop() {
                Ok(n) => sum += n,
                Err(QueueError::Interrupted) => break,
                Err(err) => {
                    publish.set_error(err.as_message());
                    return;
                }
            }
        }
        publish.set(sum);
    });

    for n in 1..=100 {
        queue.push(n);
    }

    // Let the worker drain the backlog, then signal shutdown.
    while !queue.is_empty() {
        std::thread::sleep(Duration::from_millis(1));
    }
    queue.interrupt();

    match outcome.get_timeout(Duration::from_secs(5)) {
        Ok(sum) => println!("[adder] sum = {sum}"),
        Err(err) => eprintln!("[adder] failed: {err}"),
    }

    worker.wait_done();
    println!("[main] pipeline stopped");
}
