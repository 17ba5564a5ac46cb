//! # Example: basic
//!
//! Register listeners, emit events, remove subscriptions.
//!
//! Demonstrates how to:
//! - Create an [`EventEmitter`] and register closures with `add_listener`.
//! - Deliver a payload to every listener of one type with `emit`.
//! - Remove a single registration through its [`Subscription`] handle.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► add_listener("order.placed", audit)   ──► Subscription (kept)
//!   ├─► add_listener("order.placed", notify)  ──► Subscription (dropped: stays registered)
//!   ├─► emit("order.placed", ...)             ──► audit, notify (registration order)
//!   ├─► audit_sub.remove()
//!   └─► emit("order.placed", ...)             ──► notify only
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use eventbox::EventEmitter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: EventEmitter<String> = EventEmitter::new();

    // Handles control individual removal; dropping one changes nothing.
    let audit = emitter.add_listener("order.placed", |order: &String| {
        println!("[audit]  recorded {order}");
    })?;
    emitter.add_listener("order.placed", |order: &String| {
        println!("[notify] mailing confirmation for {order}");
    })?;

    println!("-- first emit: both listeners, registration order");
    emitter.emit("order.placed", &"order-1001".to_string());

    // Unknown event types are a silent no-op, never an error.
    emitter.emit("order.cancelled", &"order-1001".to_string());

    audit.remove();
    println!("-- second emit: audit removed, notify remains");
    emitter.emit("order.placed", &"order-1002".to_string());

    println!(
        "-- {} listener(s) left for order.placed",
        emitter.listener_count("order.placed")
    );
    Ok(())
}
