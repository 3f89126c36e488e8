//! # Blocking handoff of one result across a thread boundary.
//!
//! [`ResultFuture`] is the minimal primitive for passing an outcome from a
//! producer thread to any number of consumer threads without polling. It is
//! resolved exactly once — with a value ([`ResultFuture::set`]) or an error
//! ([`ResultFuture::set_error`]) — and stays terminal afterwards.
//!
//! Timed retrieval exists so a consumer is never permanently hostage to a
//! producer that crashed, deadlocked, or computes forever: [`ResultFuture::get_timeout`]
//! bounds the *caller's* wait only; it has no effect on whether or when the
//! producer eventually resolves the cell.
//!
//! ## Resolution semantics
//! Every `get`, on however many threads and in whatever order relative to the
//! resolution, observes the single stored outcome. The first `set`/`set_error`
//! wins; later calls are ignored and return `false` (see the method docs).
//!
//! ## Example
//! ```rust
//! use std::thread;
//! use threadkit::ResultFuture;
//!
//! let future = ResultFuture::new();
//! let producer = future.clone();
//!
//! thread::spawn(move || {
//!     producer.set(21 * 2);
//! });
//!
//! assert_eq!(future.get(), Ok(42));
//! assert!(future.is_done());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::FutureError;

/// The stored resolution: a value or an error message.
type Outcome<R> = Result<R, String>;

struct Shared<R> {
    /// `None` while pending; written exactly once, under the lock, before the
    /// condvar broadcast.
    outcome: Mutex<Option<Outcome<R>>>,
    resolved: Condvar,
}

/// Single-assignment value/error cell with blocking and timed retrieval.
///
/// Cloning is cheap (`Arc` inner) and is how the cell is shared between the
/// producing and consuming sides. `R: Clone` is required for retrieval because
/// every reader observes the same stored outcome.
pub struct ResultFuture<R> {
    shared: Arc<Shared<R>>,
}

impl<R> Clone for ResultFuture<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R> Default for ResultFuture<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ResultFuture<R> {
    /// Creates a pending future, suitable for representing an in-progress
    /// computation.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                outcome: Mutex::new(None),
                resolved: Condvar::new(),
            }),
        }
    }

    /// Resolves the future with `value` and wakes all waiters.
    ///
    /// Returns `true` if this call resolved the future. Calling `set` or
    /// `set_error` more than once is a usage error; the first resolution wins
    /// and later calls are ignored (returning `false`), leaving the stored
    /// outcome untouched.
    pub fn set(&self, value: R) -> bool {
        let mut outcome = self.shared.outcome.lock();
        if outcome.is_some() {
            return false;
        }
        *outcome = Some(Ok(value));
        self.shared.resolved.notify_all();
        true
    }

    /// Resolves the future with an error and wakes all waiters.
    ///
    /// The message is what readers receive inside
    /// [`FutureError::Execution`]. Same first-wins semantics as
    /// [`ResultFuture::set`].
    pub fn set_error(&self, message: impl Into<String>) -> bool {
        let mut outcome = self.shared.outcome.lock();
        if outcome.is_some() {
            return false;
        }
        *outcome = Some(Err(message.into()));
        self.shared.resolved.notify_all();
        true
    }

    /// Returns whether resolution (success or error) has occurred. Never blocks.
    pub fn is_done(&self) -> bool {
        self.shared.outcome.lock().is_some()
    }
}

impl<R: Clone> ResultFuture<R> {
    /// Blocks until the future is resolved, then returns the stored value.
    ///
    /// Fails with [`FutureError::Execution`] (carrying the producer's
    /// message) if the future was resolved via [`ResultFuture::set_error`].
    /// A call issued after resolution returns immediately.
    pub fn get(&self) -> Result<R, FutureError> {
        let mut outcome = self.shared.outcome.lock();
        loop {
            if let Some(stored) = outcome.as_ref() {
                return Self::resolve(stored);
            }
            self.shared.resolved.wait(&mut outcome);
        }
    }

    /// As [`ResultFuture::get`], but bounded by `timeout`.
    ///
    /// `Duration::ZERO` selects an unbounded wait (same as `get`); callers
    /// needing a zero-wait poll should use [`ResultFuture::is_done`]. A
    /// positive timeout fails with [`FutureError::Timeout`] once the deadline
    /// elapses before resolution. Spurious wakeups re-wait the remaining time.
    pub fn get_timeout(&self, timeout: Duration) -> Result<R, FutureError> {
        if timeout.is_zero() {
            return self.get();
        }

        // A timeout too large to be a deadline is as good as no timeout.
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return self.get(),
        };
        let mut outcome = self.shared.outcome.lock();
        loop {
            if let Some(stored) = outcome.as_ref() {
                return Self::resolve(stored);
            }
            if self
                .shared
                .resolved
                .wait_until(&mut outcome, deadline)
                .timed_out()
            {
                // One last look: resolution may have raced the deadline.
                return match outcome.as_ref() {
                    Some(stored) => Self::resolve(stored),
                    None => Err(FutureError::Timeout { waited: timeout }),
                };
            }
        }
    }

    fn resolve(stored: &Outcome<R>) -> Result<R, FutureError> {
        match stored {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(FutureError::Execution {
                message: message.clone(),
            }),
        }
    }
}

impl<R> fmt::Debug for ResultFuture<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.shared.outcome.lock();
        let state = match outcome.as_ref() {
            None => "pending",
            Some(Ok(_)) => "resolved",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("ResultFuture").field("state", &state).finish()
    }
}
