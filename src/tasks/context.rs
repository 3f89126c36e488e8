//! # Delegate-visible task handle and shared loop state.
//!
//! [`TaskContext`] is the self-referential capability handed to every delegate
//! invocation: through it a running unit of work can request its own
//! cancellation or check whether one was requested, without any implicit
//! shared mutable context.
//!
//! The same handle backs [`CyclePolicy`](crate::CyclePolicy) implementations;
//! [`TaskContext::wait_cancel_requested`] is the interruption-aware sleep that
//! lets a periodic policy cut its interval short the moment `cancel()` lands.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::diag::{Level, SinkRef};

/// Loop flags guarded by the task's single internal lock. The condvar is
/// signaled after mutation, under the same lock, for both flags.
pub(crate) struct LoopState {
    /// Set by `cancel()`; idempotent, never cleared.
    pub(crate) cancel_requested: bool,
    /// Set exactly once when the worker loop exits (or unwinds).
    pub(crate) terminated: bool,
}

pub(crate) struct TaskShared {
    pub(crate) state: Mutex<LoopState>,
    pub(crate) signal: Condvar,
    pub(crate) name: Cow<'static, str>,
    pub(crate) sink: Option<SinkRef>,
}

impl TaskShared {
    pub(crate) fn new(name: Cow<'static, str>, sink: Option<SinkRef>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(LoopState {
                cancel_requested: false,
                terminated: false,
            }),
            signal: Condvar::new(),
            name,
            sink,
        })
    }

    pub(crate) fn request_cancel(&self) {
        {
            let mut state = self.state.lock();
            state.cancel_requested = true;
            self.signal.notify_all();
        }
        self.trace(Level::Debug, || format!("task={} cancel requested", self.name));
    }

    pub(crate) fn trace(&self, level: Level, message: impl FnOnce() -> String) {
        if let Some(sink) = &self.sink {
            sink.log(level, &message());
        }
    }
}

/// Handle to a running task, passed into the delegate on every cycle.
///
/// Cloneable and cheap; a delegate may stash a clone to hand to collaborating
/// threads (e.g. so an external condition can cancel the worker).
#[derive(Clone)]
pub struct TaskContext {
    shared: Arc<TaskShared>,
}

impl TaskContext {
    pub(crate) fn new(shared: Arc<TaskShared>) -> Self {
        Self { shared }
    }

    pub(crate) fn shared(&self) -> &Arc<TaskShared> {
        &self.shared
    }

    /// Returns the task's diagnostic name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Requests cooperative cancellation of the owning task. Idempotent.
    ///
    /// The current delegate invocation is never interrupted; the loop stops
    /// after the current cycle once the continuation policy observes the flag.
    pub fn cancel(&self) {
        self.shared.request_cancel();
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancel_requested(&self) -> bool {
        self.shared.state.lock().cancel_requested
    }

    /// Sleeps up to `timeout`, waking early if cancellation is requested.
    ///
    /// Returns whether cancellation was requested before or during the wait.
    /// With `Duration::ZERO` this is a plain flag check. This is the building
    /// block for interruption-aware inter-cycle sleeps: a `cancel()` landing
    /// mid-sleep shortens the wait instead of letting the caller sit out a
    /// stale interval.
    pub fn wait_cancel_requested(&self, timeout: Duration) -> bool {
        let mut state = self.shared.state.lock();
        if timeout.is_zero() {
            return state.cancel_requested;
        }
        // A timeout too large to be a deadline degenerates to waiting on the
        // cancel signal alone.
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                while !state.cancel_requested {
                    self.shared.signal.wait(&mut state);
                }
                return true;
            }
        };
        while !state.cancel_requested {
            if self
                .shared
                .signal
                .wait_until(&mut state, deadline)
                .timed_out()
            {
                return state.cancel_requested;
            }
        }
        true
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("TaskContext")
            .field("name", &self.shared.name)
            .field("cancel_requested", &state.cancel_requested)
            .field("terminated", &state.terminated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn standalone(name: &'static str) -> TaskContext {
        TaskContext::new(TaskShared::new(Cow::Borrowed(name), None))
    }

    #[test]
    fn test_cancel_is_idempotent_and_visible() {
        let ctx = standalone("t");
        assert!(!ctx.is_cancel_requested());
        ctx.cancel();
        ctx.cancel();
        assert!(ctx.is_cancel_requested());
    }

    #[test]
    fn test_zero_wait_is_a_flag_check() {
        let ctx = standalone("t");
        assert!(!ctx.wait_cancel_requested(Duration::ZERO));
        ctx.cancel();
        assert!(ctx.wait_cancel_requested(Duration::ZERO));
    }

    #[test]
    fn test_wait_times_out_without_cancel() {
        let ctx = standalone("t");
        let started = Instant::now();
        assert!(!ctx.wait_cancel_requested(Duration::from_millis(50)));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_extreme_timeout_waits_for_cancel_instead_of_panicking() {
        // Duration::MAX cannot be turned into a deadline; the wait must
        // degrade to waiting on the cancel signal, not overflow.
        let ctx = standalone("t");
        let other = ctx.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            other.cancel();
        });
        assert!(ctx.wait_cancel_requested(Duration::MAX));
    }

    #[test]
    fn test_cancel_cuts_wait_short() {
        let ctx = standalone("t");
        let other = ctx.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            other.cancel();
        });

        let started = Instant::now();
        assert!(ctx.wait_cancel_requested(Duration::from_secs(30)));
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "cancel did not shorten the wait"
        );
    }
}
