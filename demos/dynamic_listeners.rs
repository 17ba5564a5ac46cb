//! # Example: dynamic_listeners
//!
//! Add and remove listeners while a dispatch cycle is running.
//!
//! Demonstrates how to:
//! - Register a single-fire listener with `once`.
//! - Deregister the running listener from inside its own callback via
//!   `remove_current_listener`.
//! - Capture a [`WeakEmitter`] inside a listener that calls back into its
//!   own emitter (a strong clone would be a reference cycle).
//!
//! ## Flow
//! ```text
//! emit("job.finished", #1)
//!   ├─► greeter        (once: removed before it runs, fires this cycle only)
//!   ├─► counter        (removes itself after the third delivery)
//!   └─► watcher        (permanent)
//!
//! emit("job.finished", #2..=#4)
//!   ├─► counter        (gone from cycle 4 on)
//!   └─► watcher
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example dynamic_listeners
//! ```

use std::cell::Cell;
use std::rc::Rc;

use eventbox::EventEmitter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: EventEmitter<u32> = EventEmitter::new();

    emitter.once("job.finished", |job: &u32| {
        println!("[greeter] first completion: job #{job}");
    })?;

    // Self-removing listener: counts three deliveries, then deregisters
    // from inside its own invocation.
    let weak = emitter.downgrade();
    let seen = Rc::new(Cell::new(0u32));
    let tally = Rc::clone(&seen);
    emitter.add_listener("job.finished", move |job: &u32| {
        tally.set(tally.get() + 1);
        println!("[counter] job #{job} ({} so far)", tally.get());
        if tally.get() == 3 {
            if let Some(emitter) = weak.upgrade() {
                emitter
                    .remove_current_listener()
                    .expect("called from inside a dispatch cycle");
                println!("[counter] done, deregistered");
            }
        }
    })?;

    emitter.add_listener("job.finished", |job: &u32| {
        println!("[watcher] job #{job}");
    })?;

    for job in 1..=4 {
        println!("-- emit job #{job}");
        emitter.emit("job.finished", &job);
    }

    println!(
        "-- {} listener(s) remain for job.finished",
        emitter.listener_count("job.finished")
    );
    Ok(())
}
