//! # Listener contracts and built-ins.
//!
//! [`Listener`] is the callable contract every subscription stores. Closures
//! get it for free through a blanket impl; types with state implement it
//! directly and act as their own invocation context.
//!
//! The optional [`LogListener`] (feature `logging`) is a stdout demo
//! listener for development and examples.

mod listener;

#[cfg(feature = "logging")]
mod log;

pub use listener::Listener;

#[cfg(feature = "logging")]
pub use log::LogListener;
