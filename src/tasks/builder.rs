//! # Task construction options.
//!
//! [`TaskBuilder`] fixes the continuation policy, pre/post cycle hooks and
//! diagnostics before spawning the worker. [`TaskBuilder::spawn`] consumes
//! the builder, binds the delegate and starts the thread — a task value is
//! always already running.

use std::borrow::Cow;

use crate::diag::SinkRef;
use crate::tasks::context::TaskShared;
use crate::tasks::policy::{CyclePolicy, RunOnce};
use crate::tasks::task::{CancellableTask, Delegate, Hook};

/// Builder for constructing a [`CancellableTask`] with optional features.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use threadkit::{CancellableTask, FixedInterval};
///
/// let task = CancellableTask::builder("sampler")
///     .policy(FixedInterval::new(Duration::from_millis(10)))
///     .pre_hook(|| { /* open cycle scope */ })
///     .post_hook(|| { /* flush */ })
///     .spawn(|ctx| {
///         if ctx.is_cancel_requested() {
///             return;
///         }
///         // sample...
///     });
///
/// task.cancel();
/// task.wait_done();
/// ```
pub struct TaskBuilder {
    name: Cow<'static, str>,
    policy: Box<dyn CyclePolicy>,
    pre: Option<Hook>,
    post: Option<Hook>,
    sink: Option<SinkRef>,
}

impl TaskBuilder {
    pub(crate) fn new(name: Cow<'static, str>) -> Self {
        Self {
            name,
            policy: Box::new(RunOnce),
            pre: None,
            post: None,
            sink: None,
        }
    }

    /// Sets the continuation policy. Defaults to [`RunOnce`].
    pub fn policy(mut self, policy: impl CyclePolicy) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Sets a hook invoked on the worker thread before every delegate cycle.
    pub fn pre_hook(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.pre = Some(Box::new(hook));
        self
    }

    /// Sets a hook invoked on the worker thread after every delegate cycle.
    pub fn post_hook(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.post = Some(Box::new(hook));
        self
    }

    /// Attaches a diagnostic sink tracing cycle start/end, cancel requests
    /// and loop exit.
    pub fn sink(mut self, sink: SinkRef) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Spawns the worker thread and returns the running task.
    pub fn spawn(self, delegate: impl FnMut(&crate::TaskContext) + Send + 'static) -> CancellableTask {
        let shared = TaskShared::new(self.name, self.sink);
        let delegate: Delegate = Box::new(delegate);
        CancellableTask::start(shared, delegate, self.policy, self.pre, self.post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::policy::FixedInterval;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_default_policy_is_run_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let task = TaskBuilder::new(Cow::Borrowed("defaults"))
            .spawn(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        task.wait_done();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_builder_policy_overrides_default() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let task = CancellableTask::builder("periodic")
            .policy(FixedInterval::new(Duration::from_millis(1)))
            .spawn(move |ctx| {
                if counter.fetch_add(1, Ordering::SeqCst) + 1 >= 5 {
                    ctx.cancel();
                }
            });
        task.wait_done();
        assert!(runs.load(Ordering::SeqCst) >= 5);
    }
}
