//! Error types returned by the toolkit's blocking operations.
//!
//! This module defines two error enums, one per primitive family:
//!
//! - [`QueueError`] — failures surfaced by [`SyncQueue`](crate::SyncQueue) consumers.
//! - [`FutureError`] — failures surfaced by [`ResultFuture`](crate::ResultFuture) readers.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! Every variant is a local, synchronous outcome reported to the calling thread at
//! the blocking call site; nothing is retried internally. Callers are expected to
//! treat these as ordinary, matchable results — e.g. a pipeline teardown calls
//! `interrupt()` and then handles `QueueError::Interrupted` from every parked consumer.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by queue consumers.
///
/// Producers never fail: `push` evicts instead of blocking or erroring.
/// Only the consuming side (`pop`, `try_pop`) reports these.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The queue was interrupted. Interruption is permanent: once set, every
    /// current and future `pop` fails with this variant, regardless of contents.
    #[error("queue interrupted; blocking consumption is shut down")]
    Interrupted,

    /// No element was immediately available for a non-blocking `try_pop`.
    #[error("queue empty; no element immediately available")]
    Empty,
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use threadkit::QueueError;
    ///
    /// assert_eq!(QueueError::Interrupted.as_label(), "queue_interrupted");
    /// assert_eq!(QueueError::Empty.as_label(), "queue_empty");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Interrupted => "queue_interrupted",
            QueueError::Empty => "queue_empty",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            QueueError::Interrupted => "interrupted".to_string(),
            QueueError::Empty => "empty".to_string(),
        }
    }
}

/// # Errors produced by future readers.
///
/// Raised by `get` / `get_timeout` on a [`ResultFuture`](crate::ResultFuture).
/// A timeout only bounds the caller's wait: the producer may still resolve the
/// future later, and a subsequent `get` will observe that resolution.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FutureError {
    /// The deadline elapsed before the future was resolved.
    #[error("timed out after {waited:?} waiting for result")]
    Timeout {
        /// The timeout that was exceeded.
        waited: Duration,
    },

    /// The future was resolved with an error by the producer (`set_error`).
    #[error("task execution failed: {message}")]
    Execution {
        /// The diagnostic message stored by the producer.
        message: String,
    },
}

impl FutureError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use threadkit::FutureError;
    ///
    /// let err = FutureError::Timeout { waited: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "future_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FutureError::Timeout { .. } => "future_timeout",
            FutureError::Execution { .. } => "future_execution",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FutureError::Timeout { waited } => format!("timeout: {waited:?}"),
            FutureError::Execution { message } => format!("execution error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_labels_are_stable() {
        assert_eq!(QueueError::Interrupted.as_label(), "queue_interrupted");
        assert_eq!(QueueError::Empty.as_label(), "queue_empty");
    }

    #[test]
    fn test_execution_error_carries_message() {
        let err = FutureError::Execution {
            message: "boom".into(),
        };
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.as_message(), "execution error: boom");
    }

    #[test]
    fn test_timeout_display_includes_duration() {
        let err = FutureError::Timeout {
            waited: Duration::from_millis(250),
        };
        assert!(err.to_string().contains("250ms"));
    }
}
