//! # eventbox
//!
//! **Eventbox** is a lightweight synchronous event emitter for Rust.
//!
//! It provides an in-process publish/subscribe primitive: callers register
//! listeners against named event types, and `emit` delivers a payload to
//! every currently-registered listener of that type on the caller's stack.
//! The crate is designed as a building block on top of which richer
//! eventing (holders, error boundaries, typed event factories) can be
//! composed.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Listener   │   │   Listener   │   │   Listener   │
//!     │ (closure or  │   │              │   │              │
//!     │ struct state)│   │              │   │              │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ add_listener / once                 │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  EventEmitter                                                 │
//! │  - SubscriptionRegistry (type ─► ordered {key ─► listener})   │
//! │  - current subscription slot (set only during dispatch)       │
//! └──────┬──────────────────────────────────────────────┬─────────┘
//!        │ returns                                      │
//!        ▼                                              ▼
//!   Subscription (keyed handle,          emit(type, &args)
//!   remove() idempotent)                   ├─ snapshot keys of `type`
//!                                          ├─ per key: re-fetch, invoke
//!                                          └─ skip keys removed mid-cycle
//! ```
//!
//! ### Dispatch contract
//! - Delivery is synchronous, in-process, and single-threaded; `emit`
//!   returns after the last listener of its snapshot ran.
//! - Within one event type, delivery order is registration order. Across
//!   types there is no ordering guarantee.
//! - Listeners may re-enter the emitter (register, remove, emit) while
//!   running. The key snapshot keeps the active cycle's dispatch set
//!   fixed: mid-cycle additions wait for the next cycle, mid-cycle
//!   removals are skipped silently.
//! - The same callable registered twice is two subscriptions and is
//!   delivered twice.
//! - A panicking listener propagates out of `emit`; the remaining
//!   listeners of that cycle are not invoked.
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                |
//! |-------------------|----------------------------------------------------------|-----------------------------------|
//! | **Listener API**  | Plug in closures or stateful handler types.              | [`Listener`]                      |
//! | **Subscriptions** | Keyed registrations, individually or bulk removable.     | [`Subscription`], [`SubscriptionRegistry`] |
//! | **Emission**      | Snapshot-based synchronous dispatch, reentrancy-safe.    | [`EventEmitter`]                  |
//! | **Self-removal**  | Deregister the running listener from inside a callback.  | [`EventEmitter::remove_current_listener`] |
//! | **Errors**        | Typed usage errors with stable labels.                   | [`EmitterError`]                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use eventbox::{EventEmitter, EmitterError};
//!
//! fn main() -> Result<(), EmitterError> {
//!     let emitter: EventEmitter<String> = EventEmitter::new();
//!
//!     let sub = emitter.add_listener("greeting", |msg: &String| {
//!         println!("heard: {msg}");
//!     })?;
//!     emitter.once("greeting", |msg: &String| {
//!         println!("heard exactly once: {msg}");
//!     })?;
//!
//!     emitter.emit("greeting", &"hello".to_string());
//!     emitter.emit("greeting", &"again".to_string());
//!
//!     assert_eq!(emitter.listener_count("greeting"), 1);
//!     sub.remove();
//!     assert!(emitter.listeners("greeting").is_empty());
//!     Ok(())
//! }
//! ```

mod emitter;
mod error;
mod listeners;
mod subscriptions;

// ---- Public re-exports ----

pub use emitter::{EventEmitter, WeakEmitter};
pub use error::EmitterError;
pub use listeners::Listener;
pub use subscriptions::{Subscription, SubscriptionKey, SubscriptionRegistry};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
