//! Error types used by the eventbox emitter.
//!
//! This module defines [`EmitterError`], the single error enum of the crate.
//! Its variants represent programmer misuse of the public API:
//!
//! - [`EmitterError::NoCurrentSubscription`] — raised by
//!   `remove_current_listener` outside of an emission cycle.
//! - [`EmitterError::EmptyEventType`] — raised when registering a listener
//!   under the empty string.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.
//!
//! Listener failures are **not** represented here: a listener that panics
//! during `emit` propagates the panic to the caller and aborts the rest of
//! that emission cycle. Callers wanting isolation wrap their own listeners.

use thiserror::Error;

/// # Errors produced by the emitter API.
///
/// These represent misuse of the eventing surface, not delivery failures —
/// emitting to an event type with zero subscribers is always a silent no-op.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterError {
    /// `remove_current_listener` was called while no listener invocation was
    /// in progress for this emitter.
    #[error("not in an emitting cycle; there is no current subscription")]
    NoCurrentSubscription,

    /// An empty string was supplied as an event type at registration.
    #[error("event type must be a non-empty string")]
    EmptyEventType,
}

impl EmitterError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventbox::EmitterError;
    ///
    /// let err = EmitterError::NoCurrentSubscription;
    /// assert_eq!(err.as_label(), "no_current_subscription");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::NoCurrentSubscription => "no_current_subscription",
            EmitterError::EmptyEventType => "empty_event_type",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitterError::NoCurrentSubscription => {
                "remove_current_listener called outside of an emitting cycle".to_string()
            }
            EmitterError::EmptyEventType => {
                "listener registered under an empty event type".to_string()
            }
        }
    }
}
