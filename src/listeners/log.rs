//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] prints every delivery it receives to stdout in a
//! human-readable format. This is primarily useful for development,
//! debugging, and examples.
//!
//! Listeners are not told which event type triggered them, so a
//! `LogListener` carries its own tag — register one per event type you want
//! traced.
//!
//! ## Output format
//! ```text
//! [greeting] args="hello"
//! [shutdown] args=()
//! ```
//!
//! ## Example
//! ```rust
//! use eventbox::{EventEmitter, LogListener};
//!
//! let emitter: EventEmitter<String> = EventEmitter::new();
//! emitter.add_listener("greeting", LogListener::new("greeting")).unwrap();
//! // emit() now prints: [greeting] args="hello"
//! emitter.emit("greeting", &"hello".to_string());
//! ```

use std::fmt;

use crate::listeners::Listener;

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Prints one line per delivery for
/// debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Listener`] for
/// structured logging or metrics collection.
pub struct LogListener {
    tag: &'static str,
}

impl LogListener {
    /// Creates a listener that prefixes every line with `tag`.
    pub fn new(tag: &'static str) -> Self {
        Self { tag }
    }
}

impl Default for LogListener {
    fn default() -> Self {
        Self::new("event")
    }
}

impl<A: fmt::Debug> Listener<A> for LogListener {
    fn on_event(&self, args: &A) {
        println!("[{}] args={:?}", self.tag, args);
    }
}
