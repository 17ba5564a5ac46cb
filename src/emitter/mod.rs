//! # Event emitter: the public eventing surface.
//!
//! [`EventEmitter`] composes a subscription registry with the dispatch
//! algorithm: emission snapshots the keys of the target type, re-checks
//! each key before invoking, and tracks the subscription currently being
//! dispatched so a listener can deregister itself mid-cycle.

mod core;
mod once;

pub use self::core::{EventEmitter, WeakEmitter};
