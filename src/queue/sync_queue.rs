//! # Thread-safe FIFO with bounded capacity and interruption.
//!
//! [`SyncQueue`] decouples producers from consumers:
//! - **Producers never block.** When a capacity is set and the queue is full,
//!   the oldest elements are evicted (reported through an optional callback)
//!   until the new element fits. Best-effort delivery: stale items are dropped,
//!   memory stays bounded.
//! - **Consumers block simply.** [`SyncQueue::pop`] parks the calling thread
//!   until an element arrives or the queue is interrupted.
//! - **Interruption is a one-shot shutdown broadcast.** [`SyncQueue::interrupt`]
//!   permanently fails every current and future `pop`, which is the "drain with
//!   `try_pop`, then stop" teardown pattern for consumer threads.
//!
//! ## Ordering
//! Within one queue instance, `pop` observes strict FIFO order relative to
//! `push` as serialized by the internal lock. No ordering is implied across
//! different queue instances.
//!
//! ## Example
//! ```rust
//! use threadkit::{QueueError, SyncQueue};
//!
//! let queue = SyncQueue::bounded(2);
//! for n in 0..5 {
//!     queue.push(n); // 0, 1, 2 get evicted
//! }
//! assert_eq!(queue.try_pop(), Ok(3));
//! assert_eq!(queue.try_pop(), Ok(4));
//! assert_eq!(queue.try_pop(), Err(QueueError::Empty));
//! ```

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

use parking_lot::{Condvar, Mutex};

use crate::diag::{Level, SinkRef};
use crate::error::QueueError;
use crate::queue::builder::QueueBuilder;

/// Eviction callback: receives each element removed to enforce the capacity
/// bound, in eviction (FIFO) order.
pub(crate) type EvictFn<T> = Box<dyn Fn(T) + Send + Sync>;

/// Lock-guarded queue state. Mutated only under [`SyncQueue::inner`];
/// the condvar is signaled after mutation, under the same lock.
struct State<T> {
    items: VecDeque<T>,
    /// One-way flag: once set it stays set for the queue's lifetime. Checked
    /// both before and during the wait so late-arriving consumers observe it.
    interrupted: bool,
}

/// Thread-safe FIFO queue with optional capacity, eviction callback and
/// permanent interruption.
///
/// ### Properties
/// - `push` never blocks and never fails; overflow evicts from the head.
/// - `pop` blocks; `try_pop` does not. Both remove from the head.
/// - `interrupt` is idempotent and wakes every parked consumer.
/// - One internal lock per instance; the queue never takes another
///   primitive's lock, so composing instances cannot deadlock.
pub struct SyncQueue<T> {
    inner: Mutex<State<T>>,
    available: Condvar,
    capacity: Option<usize>,
    on_evict: Option<EvictFn<T>>,
    sink: Option<SinkRef>,
    name: Cow<'static, str>,
}

impl<T> SyncQueue<T> {
    /// Creates a queue without a capacity bound. `push` only ever appends.
    pub fn unbounded() -> Self {
        Self::builder().build()
    }

    /// Creates a queue holding at most `capacity` elements.
    ///
    /// The minimum capacity is 1 (clamped). Overflow evicts silently; attach
    /// an eviction callback through [`SyncQueue::builder`] to observe drops.
    pub fn bounded(capacity: usize) -> Self {
        Self::builder().capacity(capacity).build()
    }

    /// Returns a builder for capacity, eviction callback and diagnostics.
    pub fn builder() -> QueueBuilder<T> {
        QueueBuilder::new()
    }

    pub(crate) fn from_parts(
        capacity: Option<usize>,
        on_evict: Option<EvictFn<T>>,
        sink: Option<SinkRef>,
        name: Cow<'static, str>,
    ) -> Self {
        Self {
            inner: Mutex::new(State {
                items: VecDeque::new(),
                interrupted: false,
            }),
            available: Condvar::new(),
            capacity,
            on_evict,
            sink,
            name,
        }
    }

    /// Appends `item` to the tail. Never blocks.
    ///
    /// If the queue is bounded and full, the oldest elements are removed until
    /// the new element fits; each removed element is handed to the eviction
    /// callback (if any), in eviction order, on the calling thread. Callbacks
    /// run after the internal lock is released, so a callback may itself use
    /// the queue. One waiting consumer is woken.
    pub fn push(&self, item: T) {
        let (evicted, len) = {
            let mut state = self.inner.lock();
            let mut evicted = Vec::new();
            if let Some(cap) = self.capacity {
                while state.items.len() >= cap {
                    match state.items.pop_front() {
                        Some(old) => evicted.push(old),
                        None => break,
                    }
                }
            }
            state.items.push_back(item);
            self.available.notify_one();
            (evicted, state.items.len())
        };

        self.trace(Level::Trace, || {
            format!(
                "queue={} push len={} evicted={}",
                self.name,
                len,
                evicted.len()
            )
        });

        if let Some(callback) = &self.on_evict {
            for old in evicted {
                callback(old);
            }
        }
    }

    /// Removes and returns the head element, blocking until one is available.
    ///
    /// Fails with [`QueueError::Interrupted`] if the queue is, or becomes,
    /// interrupted while waiting. Interruption takes precedence over
    /// availability: on an interrupted queue every `pop` fails immediately,
    /// even if elements remain (drain those with [`SyncQueue::try_pop`]).
    pub fn pop(&self) -> Result<T, QueueError> {
        let mut state = self.inner.lock();
        loop {
            if state.interrupted {
                drop(state);
                self.trace(Level::Debug, || {
                    format!("queue={} pop failed: interrupted", self.name)
                });
                return Err(QueueError::Interrupted);
            }
            if let Some(item) = state.items.pop_front() {
                let len = state.items.len();
                drop(state);
                self.trace(Level::Trace, || format!("queue={} pop len={}", self.name, len));
                return Ok(item);
            }
            self.available.wait(&mut state);
        }
    }

    /// Removes and returns the head element without blocking.
    ///
    /// Fails with [`QueueError::Empty`] when nothing is immediately available.
    /// Independent of interruption: an interrupted non-empty queue still
    /// yields its elements here, and an interrupted empty queue reports
    /// [`QueueError::Empty`], not [`QueueError::Interrupted`].
    pub fn try_pop(&self) -> Result<T, QueueError> {
        let mut state = self.inner.lock();
        match state.items.pop_front() {
            Some(item) => {
                let len = state.items.len();
                drop(state);
                self.trace(Level::Trace, || {
                    format!("queue={} try_pop len={}", self.name, len)
                });
                Ok(item)
            }
            None => Err(QueueError::Empty),
        }
    }

    /// Returns whether the queue currently holds no elements.
    ///
    /// Reflects element count only; unaffected by interruption.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Returns the number of currently queued elements.
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Interrupts the queue: sets the permanent interrupted flag and wakes
    /// every thread blocked in [`SyncQueue::pop`]. Idempotent; there is no
    /// way to un-interrupt.
    pub fn interrupt(&self) {
        {
            let mut state = self.inner.lock();
            state.interrupted = true;
            self.available.notify_all();
        }
        self.trace(Level::Info, || format!("queue={} interrupted", self.name));
    }

    /// Returns whether [`SyncQueue::interrupt`] has been called.
    pub fn is_interrupted(&self) -> bool {
        self.inner.lock().interrupted
    }

    fn trace(&self, level: Level, message: impl FnOnce() -> String) {
        if let Some(sink) = &self.sink {
            sink.log(level, &message());
        }
    }
}

impl<T> fmt::Debug for SyncQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("SyncQueue")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("len", &state.items.len())
            .field("interrupted", &state.interrupted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_basic_push_pop_single_threaded() {
        let queue = SyncQueue::unbounded();

        queue.push(12);
        queue.push(24);
        queue.push(36);

        assert_eq!(queue.pop(), Ok(12));
        assert_eq!(queue.pop(), Ok(24));
        assert_eq!(queue.pop(), Ok(36));
    }

    #[test]
    fn test_fifo_order_preserved() {
        let queue = SyncQueue::unbounded();
        for n in 0..100 {
            queue.push(n);
        }
        for n in 0..100 {
            assert_eq!(queue.pop(), Ok(n), "element {} out of order", n);
        }
    }

    #[test]
    fn test_bounded_eviction_order_and_contents() {
        let evicted = Arc::new(StdMutex::new(Vec::new()));
        let seen = Arc::clone(&evicted);
        let queue = SyncQueue::builder()
            .capacity(2)
            .on_evict(move |n: i32| seen.lock().unwrap().push(n))
            .build();

        for n in 0..5 {
            queue.push(n);
        }

        assert_eq!(*evicted.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(queue.try_pop(), Ok(3));
        assert_eq!(queue.try_pop(), Ok(4));
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let queue = SyncQueue::bounded(3);
        for n in 0..50 {
            queue.push(n);
            assert!(queue.len() <= 3, "len {} exceeds capacity", queue.len());
        }
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_capacity_clamped_to_one() {
        let queue = SyncQueue::bounded(0);
        queue.push(1);
        queue.push(2);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.try_pop(), Ok(2));
    }

    #[test]
    fn test_try_pop_empty_then_one_element() {
        let queue = SyncQueue::unbounded();
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
        queue.push(7);
        assert_eq!(queue.try_pop(), Ok(7));
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
    }

    #[test]
    fn test_pop_waits_for_push() {
        let queue = Arc::new(SyncQueue::unbounded());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(50));
        queue.push(42);

        assert_eq!(consumer.join().unwrap(), Ok(42));
    }

    #[test]
    fn test_interrupt_wakes_blocked_consumers() {
        let queue: Arc<SyncQueue<i32>> = Arc::new(SyncQueue::unbounded());
        let mut consumers = Vec::new();
        for _ in 0..3 {
            let queue = Arc::clone(&queue);
            consumers.push(thread::spawn(move || queue.pop()));
        }

        thread::sleep(Duration::from_millis(50));
        queue.interrupt();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), Err(QueueError::Interrupted));
        }
    }

    #[test]
    fn test_pop_after_interrupt_fails_regardless_of_contents() {
        let queue = SyncQueue::unbounded();
        queue.push(1);
        queue.interrupt();
        assert_eq!(queue.pop(), Err(QueueError::Interrupted));
        // Still drainable without blocking semantics.
        assert_eq!(queue.try_pop(), Ok(1));
        assert_eq!(queue.try_pop(), Err(QueueError::Empty));
    }

    #[test]
    fn test_interrupt_is_idempotent() {
        let queue: SyncQueue<i32> = SyncQueue::unbounded();
        queue.interrupt();
        queue.interrupt();
        assert!(queue.is_interrupted());
        assert_eq!(queue.pop(), Err(QueueError::Interrupted));
    }

    #[test]
    fn test_is_empty_unaffected_by_interruption() {
        let queue = SyncQueue::unbounded();
        queue.push(9);
        queue.interrupt();
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_push_still_works_after_interrupt() {
        let queue = SyncQueue::unbounded();
        queue.interrupt();
        queue.push(5);
        assert_eq!(queue.try_pop(), Ok(5));
    }

    #[test]
    fn test_concurrent_producers_consumers_drain_everything() {
        let queue = Arc::new(SyncQueue::unbounded());
        let consumed = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for p in 0..4 {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                for n in 0..250 {
                    queue.push(p * 1000 + n);
                }
            }));
        }
        for _ in 0..4 {
            let queue = Arc::clone(&queue);
            let consumed = Arc::clone(&consumed);
            handles.push(thread::spawn(move || {
                while queue.pop().is_ok() {
                    consumed.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        // Let producers finish, then drain and shut down.
        for handle in handles.drain(..4) {
            handle.join().unwrap();
        }
        while !queue.is_empty() {
            thread::sleep(Duration::from_millis(5));
        }
        queue.interrupt();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(consumed.load(Ordering::SeqCst), 1000);
    }

    struct Capture(StdMutex<Vec<(Level, String)>>);

    impl crate::diag::DiagnosticSink for Capture {
        fn log(&self, level: Level, message: &str) {
            self.0.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_sinked_queue_traces_without_changing_behavior() {
        let sink = Arc::new(Capture(StdMutex::new(Vec::new())));
        let evicted = Arc::new(StdMutex::new(Vec::new()));
        let seen = Arc::clone(&evicted);
        let queue = SyncQueue::builder()
            .name("traced")
            .capacity(2)
            .on_evict(move |n: i32| seen.lock().unwrap().push(n))
            .sink(Arc::clone(&sink) as SinkRef)
            .build();

        // Functional behavior is identical to the sink-less queue: same
        // evictions, same survivors, same interruption semantics.
        for n in 0..5 {
            queue.push(n);
        }
        assert_eq!(*evicted.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(queue.try_pop(), Ok(3));
        queue.interrupt();
        assert_eq!(queue.pop(), Err(QueueError::Interrupted));
        assert_eq!(queue.try_pop(), Ok(4));

        let lines = sink.0.lock().unwrap();
        assert!(
            lines
                .iter()
                .any(|(l, m)| *l == Level::Trace && m.contains("queue=traced push")),
            "no push trace in {lines:?}"
        );
        assert!(
            lines.iter().any(|(_, m)| m.contains("evicted=1")),
            "no eviction trace in {lines:?}"
        );
        assert!(
            lines
                .iter()
                .any(|(l, m)| *l == Level::Trace && m.contains("try_pop")),
            "no try_pop trace in {lines:?}"
        );
        assert!(
            lines
                .iter()
                .any(|(l, m)| *l == Level::Info && m.contains("interrupted")),
            "no interrupt trace in {lines:?}"
        );
        assert!(
            lines
                .iter()
                .any(|(l, m)| *l == Level::Debug && m.contains("pop failed: interrupted")),
            "no failed-pop trace in {lines:?}"
        );
    }

    #[test]
    fn test_eviction_callback_may_reenter_queue() {
        // The callback runs outside the lock, so pushing from it must not
        // deadlock. The reentrant push lands on an unbounded sibling.
        let overflow = Arc::new(SyncQueue::unbounded());
        let spill = Arc::clone(&overflow);
        let queue = SyncQueue::builder()
            .capacity(1)
            .on_evict(move |n: i32| spill.push(n))
            .build();

        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(overflow.try_pop(), Ok(1));
        assert_eq!(overflow.try_pop(), Ok(2));
        assert_eq!(queue.try_pop(), Ok(3));
    }
}
