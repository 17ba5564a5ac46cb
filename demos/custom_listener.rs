//! # Example: custom_listener
//!
//! Demonstrates how to build and attach a stateful listener type.
//!
//! Shows how to:
//! - Implement the [`Listener`] trait on your own struct.
//! - Keep per-listener state across deliveries (`Cell`/`RefCell` fields,
//!   since invocation is `&self`).
//! - Mix struct listeners and closures on the same event type.
//!
//! ## Flow
//! ```text
//! emit("sensor.reading", value)
//!   ├─► Threshold.on_event()   (struct: compares against its own limit)
//!   ├─► Averager.on_event()    (struct: accumulates into Cell fields)
//!   └─► closure                (prints the raw value)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_listener
//! ```

use std::cell::Cell;

use eventbox::{EventEmitter, Listener};

/// Alerts whenever a reading exceeds the configured limit.
/// In real life, you could export metrics, ship logs, or trigger alerts.
struct Threshold {
    limit: f64,
}

impl Listener<f64> for Threshold {
    fn on_event(&self, reading: &f64) {
        if *reading > self.limit {
            println!("[alert] {reading} exceeds limit {}", self.limit);
        }
    }
}

/// Running average over every reading it has seen.
struct Averager {
    sum: Cell<f64>,
    count: Cell<u32>,
}

impl Averager {
    fn new() -> Self {
        Self {
            sum: Cell::new(0.0),
            count: Cell::new(0),
        }
    }
}

impl Listener<f64> for Averager {
    fn on_event(&self, reading: &f64) {
        self.sum.set(self.sum.get() + reading);
        self.count.set(self.count.get() + 1);
        println!(
            "[avg]   {:.2} over {} reading(s)",
            self.sum.get() / f64::from(self.count.get()),
            self.count.get()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: EventEmitter<f64> = EventEmitter::new();

    emitter.add_listener("sensor.reading", Threshold { limit: 40.0 })?;
    emitter.add_listener("sensor.reading", Averager::new())?;
    emitter.add_listener("sensor.reading", |reading: &f64| {
        println!("[raw]   {reading}");
    })?;

    for reading in [21.5, 38.2, 44.0, 19.7] {
        println!("-- emit {reading}");
        emitter.emit("sensor.reading", &reading);
    }
    Ok(())
}
