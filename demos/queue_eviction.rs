//! # Example: queue_eviction
//!
//! Minimal example of a bounded queue dropping stale elements under a slow
//! (here: absent) consumer.
//!
//! Demonstrates how to:
//! - Bound a [`SyncQueue`] with a capacity.
//! - Observe drops through the eviction callback.
//! - Drain the survivors with `try_pop`.
//!
//! ## Run
//! ```bash
//! cargo run --example queue_eviction
//! ```

use threadkit::{QueueError, SyncQueue};

fn main() {
    // 1. Capacity 3, with every eviction reported to the callback
    let queue = SyncQueue::builder()
        .name("events")
        .capacity(3)
        .on_evict(|stale: u32| println!("[evicted] {stale}"))
        .build();

    // 2. Push well past capacity; producers never block, the oldest go first
    for n in 0..10 {
        queue.push(n);
    }

    // 3. Only the newest three survive, still in FIFO order
    loop {
        match queue.try_pop() {
            Ok(n) => println!("[popped] {n}"),
            Err(QueueError::Empty) => break,
            Err(err) => {
                eprintln!("[error] {err}");
                break;
            }
        }
    }
}
