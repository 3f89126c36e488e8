//! Cross-primitive pipeline: a periodic producer feeds a bounded queue, a
//! consumer worker drains it and publishes its outcome through a future, and
//! the whole thing shuts down via `interrupt()` + `cancel()`.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use threadkit::{CancellableTask, FutureError, QueueError, ResultFuture, SyncQueue};

#[test]
fn test_periodic_producer_queue_consumer_future_pipeline() {
    let queue = Arc::new(SyncQueue::bounded(128));
    let outcome = ResultFuture::new();

    let next = Arc::new(AtomicU64::new(1));
    let feed = Arc::clone(&queue);
    let seq = Arc::clone(&next);
    let producer = CancellableTask::spawn_periodic("producer", Duration::from_millis(1), move |_| {
        feed.push(seq.fetch_add(1, Ordering::SeqCst));
    });

    let drain = Arc::clone(&queue);
    let publish = outcome.clone();
    let consumer = CancellableTask::spawn("consumer", move |_| {
        let mut received = Vec::new();
        loop {
            match drain.pop() {
                Ok(n) => received.push(n),
                Err(QueueError::Interrupted) => break,
                Err(err) => {
                    publish.set_error(err.as_message());
                    return;
                }
            }
        }
        // FIFO law holds end to end: a bounded-but-never-full queue keeps
        // the push order intact.
        let ordered = received.windows(2).all(|pair| pair[0] < pair[1]);
        if ordered {
            publish.set(received.len() as u64);
        } else {
            publish.set_error("out-of-order delivery");
        }
    });

    // Let a few dozen elements flow, then tear down.
    while next.load(Ordering::SeqCst) < 20 {
        std::thread::sleep(Duration::from_millis(2));
    }
    producer.cancel();
    producer.wait_done();
    // Interruption outranks queued items, so let the consumer drain the
    // backlog before shutting consumption down.
    while !queue.is_empty() {
        std::thread::sleep(Duration::from_millis(1));
    }
    queue.interrupt();

    let consumed = outcome
        .get_timeout(Duration::from_secs(10))
        .expect("consumer never published");
    assert!(consumed >= 19, "only {consumed} elements made it through");

    consumer.wait_done();
    assert!(consumer.is_terminated());
    assert!(producer.is_terminated());
}

#[test]
fn test_eviction_counts_under_slow_consumer() {
    let evictions = Arc::new(AtomicUsize::new(0));
    let dropped = Arc::clone(&evictions);
    let queue: Arc<SyncQueue<u32>> = Arc::new(
        SyncQueue::builder()
            .name("lossy")
            .capacity(4)
            .on_evict(move |_| {
                dropped.fetch_add(1, Ordering::SeqCst);
            })
            .build(),
    );

    // No consumer at all: length M past capacity N evicts exactly M - N.
    for n in 0..20 {
        queue.push(n);
    }
    assert_eq!(evictions.load(Ordering::SeqCst), 16);
    assert_eq!(queue.len(), 4);

    // The survivors are the last four pushed, in order.
    for expected in 16..20 {
        assert_eq!(queue.try_pop(), Ok(expected));
    }
}

#[test]
fn test_timed_wait_on_abandoned_worker() {
    // A worker that never resolves its future must not hold the caller
    // hostage: the timed get returns while the worker is still parked.
    let queue: Arc<SyncQueue<()>> = Arc::new(SyncQueue::unbounded());
    let outcome: ResultFuture<()> = ResultFuture::new();

    let park = Arc::clone(&queue);
    let publish = outcome.clone();
    let worker = CancellableTask::spawn("stuck", move |_| {
        // Blocks forever: nothing is ever pushed.
        if park.pop().is_ok() {
            publish.set(());
        }
    });

    let result = outcome.get_timeout(Duration::from_millis(100));
    assert!(matches!(result, Err(FutureError::Timeout { .. })));

    // Unblock and tear down the worker to finish the test cleanly.
    queue.interrupt();
    worker.wait_done();
}
