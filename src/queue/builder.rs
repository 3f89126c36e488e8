//! # Queue construction options.
//!
//! [`QueueBuilder`] fixes capacity, eviction callback, diagnostics sink and
//! name at construction time; none of these can change over a queue's
//! lifetime.

use std::borrow::Cow;

use crate::diag::SinkRef;
use crate::queue::sync_queue::{EvictFn, SyncQueue};

/// Builder for constructing a [`SyncQueue`] with optional features.
///
/// ## Example
/// ```rust
/// use threadkit::SyncQueue;
///
/// let queue = SyncQueue::builder()
///     .name("events")
///     .capacity(128)
///     .on_evict(|stale: u64| eprintln!("dropped {stale}"))
///     .build();
/// queue.push(1);
/// ```
pub struct QueueBuilder<T> {
    capacity: Option<usize>,
    on_evict: Option<EvictFn<T>>,
    sink: Option<SinkRef>,
    name: Cow<'static, str>,
}

impl<T> QueueBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: None,
            on_evict: None,
            sink: None,
            name: Cow::Borrowed("queue"),
        }
    }

    /// Bounds the queue to `capacity` elements. The minimum is 1 (clamped).
    ///
    /// Without this call the queue is unbounded and never evicts.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity.max(1));
        self
    }

    /// Sets the eviction callback, invoked once per element dropped to
    /// enforce the capacity bound, in eviction (FIFO) order, on the pushing
    /// thread, outside the queue's internal lock.
    pub fn on_evict(mut self, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.on_evict = Some(Box::new(callback));
        self
    }

    /// Attaches a diagnostic sink tracing push/pop/evict/interrupt events.
    ///
    /// Purely observational; absence changes nothing but the silence.
    pub fn sink(mut self, sink: SinkRef) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Names the queue for diagnostic output. Defaults to `"queue"`.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds the queue. Capacity, callback and sink are fixed from here on.
    pub fn build(self) -> SyncQueue<T> {
        SyncQueue::from_parts(self.capacity, self.on_evict, self.sink, self.name)
    }
}
