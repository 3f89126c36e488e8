//! # Worker thread running a delegate until told to stop.
//!
//! [`CancellableTask`] spawns one dedicated thread at construction and drives
//! the loop: pre-hook, delegate (with a [`TaskContext`] handle), post-hook,
//! then the [`CyclePolicy`](crate::CyclePolicy) decides whether to go again.
//! On final exit the worker flips the terminated flag and broadcasts to every
//! [`CancellableTask::wait_done`] caller, exactly once.
//!
//! ## Lifecycle
//! ```text
//! spawn() ──► Running ── policy says stop / cancel observed ──► Terminated
//! ```
//! Construction *is* the start: there is no unstarted state to wait on.
//!
//! ## Cancellation
//! [`CancellableTask::cancel`] is cooperative and best-effort. It requests
//! that the loop stop after the current cycle; it never force-terminates the
//! worker or interrupts a delegate invocation in progress. Delegates that run
//! long should poll `ctx.is_cancel_requested()` themselves.
//!
//! ## Failure
//! A panic in the delegate is fatal for the worker: nothing is caught,
//! retried or swallowed. A drop guard still flips the terminated flag during
//! unwind so `wait_done()` callers are released; the panic payload itself is
//! surfaced by [`CancellableTask::join`].
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use threadkit::CancellableTask;
//!
//! let task = CancellableTask::spawn_periodic("poller", Duration::from_millis(5), |ctx| {
//!     // pull work; a delegate can also stop itself:
//!     if false { ctx.cancel(); }
//! });
//!
//! task.cancel();
//! task.wait_done();
//! assert!(task.is_terminated());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::diag::Level;
use crate::tasks::builder::TaskBuilder;
use crate::tasks::context::{TaskContext, TaskShared};
use crate::tasks::policy::{CyclePolicy, FixedInterval};

pub(crate) type Delegate = Box<dyn FnMut(&TaskContext) + Send>;
pub(crate) type Hook = Box<dyn FnMut() + Send>;

/// Owns a worker thread that repeatedly executes a delegate until cancelled.
///
/// The handle is the control surface: `cancel`, `wait_done`, `join`,
/// state queries. Dropping the handle detaches the worker (it keeps running
/// to its natural end); call [`CancellableTask::cancel`] first for an orderly
/// shutdown.
pub struct CancellableTask {
    shared: Arc<TaskShared>,
    worker: Option<JoinHandle<()>>,
}

impl CancellableTask {
    /// Spawns a task that executes `delegate` once and terminates
    /// ([`RunOnce`](crate::RunOnce) policy).
    pub fn spawn(
        name: impl Into<Cow<'static, str>>,
        delegate: impl FnMut(&TaskContext) + Send + 'static,
    ) -> Self {
        Self::builder(name).spawn(delegate)
    }

    /// Spawns a task that executes `delegate` every `interval` until
    /// cancelled ([`FixedInterval`] policy).
    ///
    /// The inter-cycle sleep is interruption-aware: cancellation mid-sleep
    /// terminates the task within a scheduling quantum.
    pub fn spawn_periodic(
        name: impl Into<Cow<'static, str>>,
        interval: Duration,
        delegate: impl FnMut(&TaskContext) + Send + 'static,
    ) -> Self {
        Self::builder(name)
            .policy(FixedInterval::new(interval))
            .spawn(delegate)
    }

    /// Returns a builder for hooks, a custom continuation policy and
    /// diagnostics.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> TaskBuilder {
        TaskBuilder::new(name.into())
    }

    pub(crate) fn start(
        shared: Arc<TaskShared>,
        mut delegate: Delegate,
        mut policy: Box<dyn CyclePolicy>,
        mut pre: Option<Hook>,
        mut post: Option<Hook>,
    ) -> Self {
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name(shared.name.to_string())
            .spawn(move || {
                let ctx = TaskContext::new(Arc::clone(&worker_shared));
                // Releases wait_done() even if the delegate panics below.
                let _guard = TerminationGuard {
                    shared: &worker_shared,
                };

                worker_shared.trace(Level::Trace, || {
                    format!("task={} loop entered", worker_shared.name)
                });
                loop {
                    let cycle_started = Instant::now();
                    if let Some(hook) = pre.as_mut() {
                        hook();
                    }
                    delegate(&ctx);
                    if let Some(hook) = post.as_mut() {
                        hook();
                    }
                    worker_shared.trace(Level::Debug, || {
                        format!(
                            "task={} cycle done elapsed={:?}",
                            worker_shared.name,
                            cycle_started.elapsed()
                        )
                    });
                    if !policy.continue_after_cycle(&ctx) {
                        break;
                    }
                }
                worker_shared.trace(Level::Info, || {
                    format!("task={} loop finished", worker_shared.name)
                });
            });

        match worker {
            Ok(handle) => Self {
                shared,
                worker: Some(handle),
            },
            Err(err) => {
                // Spawn refusal: mark terminated so waiters never park.
                {
                    let mut state = shared.state.lock();
                    state.terminated = true;
                    shared.signal.notify_all();
                }
                shared.trace(Level::Warn, || {
                    format!("task={} failed to spawn worker: {err}", shared.name)
                });
                Self {
                    shared,
                    worker: None,
                }
            }
        }
    }

    /// Returns the task's diagnostic name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Returns a context handle for this task, the same capability the
    /// delegate receives. Useful for cancelling from collaborating threads.
    pub fn context(&self) -> TaskContext {
        TaskContext::new(Arc::clone(&self.shared))
    }

    /// Requests cooperative cancellation. Valid in any state, idempotent;
    /// only observable while the loop is still running.
    pub fn cancel(&self) {
        self.shared.request_cancel();
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancel_requested(&self) -> bool {
        self.shared.state.lock().cancel_requested
    }

    /// Returns whether the worker loop has exited. Once `true`, the delegate
    /// will never execute again.
    pub fn is_terminated(&self) -> bool {
        self.shared.state.lock().terminated
    }

    /// Blocks until the worker loop has exited. Callable from any number of
    /// threads; all are released by the single termination broadcast.
    ///
    /// Returns even if the delegate panicked (the worker's unwind still flips
    /// the terminated flag); use [`CancellableTask::join`] to observe the
    /// panic itself.
    pub fn wait_done(&self) {
        let mut state = self.shared.state.lock();
        while !state.terminated {
            self.shared.signal.wait(&mut state);
        }
    }

    /// Joins the worker thread, consuming the handle.
    ///
    /// Returns `Err` with the panic payload if the delegate panicked.
    pub fn join(mut self) -> thread::Result<()> {
        match self.worker.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for CancellableTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("CancellableTask")
            .field("name", &self.shared.name)
            .field("cancel_requested", &state.cancel_requested)
            .field("terminated", &state.terminated)
            .finish()
    }
}

/// Flips the terminated flag and broadcasts, exactly once, when the worker
/// exits — normally or by unwinding.
struct TerminationGuard<'a> {
    shared: &'a Arc<TaskShared>,
}

impl Drop for TerminationGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.terminated = true;
        self.shared.signal.notify_all();
    }
}
