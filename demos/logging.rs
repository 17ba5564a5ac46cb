//! # Example: logging
//!
//! Trace deliveries with the built-in [`LogListener`].
//!
//! Demonstrates how to:
//! - Attach the feature-gated `LogListener` alongside real listeners.
//! - Tag one `LogListener` per event type you want traced.
//!
//! ## Run
//! Requires the `logging` feature to export [`LogListener`].
//! ```bash
//! cargo run --example logging --features logging
//! ```

use eventbox::{EventEmitter, LogListener};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: EventEmitter<String> = EventEmitter::new();

    // One tagged tracer per type; listeners are not told which event type
    // triggered them.
    emitter.add_listener("user.login", LogListener::new("user.login"))?;
    emitter.add_listener("user.logout", LogListener::new("user.logout"))?;

    emitter.add_listener("user.login", |name: &String| {
        println!("welcome back, {name}");
    })?;

    emitter.emit("user.login", &"ada".to_string());
    emitter.emit("user.logout", &"ada".to_string());
    Ok(())
}
