//! # Continuation policies for the task loop.
//!
//! After every cycle (pre-hook, delegate, post-hook) the worker asks its
//! [`CyclePolicy`] whether to run again. Only this decision point varies
//! between task flavors, so it is a pluggable trait supplied at construction
//! rather than a subclassing seam:
//!
//! - [`RunOnce`] — the base behavior: stop after a single execution.
//! - [`FixedInterval`] — the periodic variant: sleep for a fixed interval,
//!   then continue unless cancellation was requested before or during the
//!   sleep.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use threadkit::{CancellableTask, FixedInterval};
//!
//! let task = CancellableTask::builder("heartbeat")
//!     .policy(FixedInterval::new(Duration::from_millis(10)))
//!     .spawn(|_ctx| { /* emit heartbeat */ });
//! task.cancel();
//! task.wait_done();
//! ```

use std::time::Duration;

use crate::tasks::context::TaskContext;

/// Decides whether the worker loop runs another cycle.
///
/// Called on the worker thread between cycles. Implementations may block
/// (an inter-cycle sleep, waiting on an external condition) but must return
/// promptly once cancellation is requested — use
/// [`TaskContext::wait_cancel_requested`] for any timed wait.
pub trait CyclePolicy: Send + 'static {
    /// Returns `true` to run another cycle, `false` to terminate the loop.
    fn continue_after_cycle(&mut self, ctx: &TaskContext) -> bool;
}

/// Stop after a single execution of the delegate.
///
/// This is the default policy of [`CancellableTask`](crate::CancellableTask):
/// one cycle, then terminate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunOnce;

impl CyclePolicy for RunOnce {
    fn continue_after_cycle(&mut self, _ctx: &TaskContext) -> bool {
        false
    }
}

/// Sleep a fixed interval between cycles, stopping on cancellation.
///
/// The sleep is interruption-aware: a `cancel()` arriving mid-sleep wakes the
/// worker immediately, so termination is observed within a scheduling quantum
/// rather than after the stale remainder of the interval. An interval of
/// `Duration::ZERO` re-checks cancellation without sleeping.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    /// Creates a policy sleeping `interval` between cycles.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Returns the configured inter-cycle interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl CyclePolicy for FixedInterval {
    fn continue_after_cycle(&mut self, ctx: &TaskContext) -> bool {
        !ctx.wait_cancel_requested(self.interval)
    }
}
