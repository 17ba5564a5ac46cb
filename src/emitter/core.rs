//! # EventEmitter - synchronous multicast dispatch.
//!
//! [`EventEmitter`] manages a set of listeners keyed by event type and
//! publishes events to them when told that such events happened. It is a
//! simple multicast mechanism on top of which extra functionality (event
//! holders, error boundaries) can be composed.
//!
//! ## Architecture
//! ```text
//! add_listener(type, l) ──► SubscriptionRegistry ──► Subscription (handle)
//!
//! emit(type, args)
//!   ├─► snapshot keys of `type`          (fixes this cycle's dispatch set)
//!   ├─► for each key, in insertion order:
//!   │     ├─ re-fetch by key             (removed mid-cycle → skip)
//!   │     ├─ current ← subscription
//!   │     └─ listener.on_event(args)     (may re-enter the emitter)
//!   └─► current ← none
//! ```
//!
//! ## Rules
//! - **Synchronous**: `emit` returns only after every listener in its
//!   snapshot has run, or one of them panicked.
//! - **Reentrant, not concurrent**: listeners may add/remove subscriptions
//!   or emit again before the outer `emit` returns; the snapshot keeps the
//!   outer cycle's dispatch set fixed.
//! - **Mid-cycle additions wait**: a listener added to a type during one of
//!   its cycles first fires on the next `emit` of that type.
//! - **Mid-cycle removals hold**: a subscription removed during a cycle is
//!   skipped when its key comes up, silently.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::EmitterError;
use crate::listeners::Listener;
use crate::subscriptions::{Subscription, SubscriptionKey, SubscriptionRegistry};

use super::once::OnceListener;

/// Subscription currently being dispatched.
struct CurrentSubscription {
    event_type: Rc<str>,
    key: SubscriptionKey,
}

/// State shared by every clone of one emitter.
pub(super) struct EmitterShared<A> {
    registry: SubscriptionRegistry<A>,
    /// Non-empty exactly while a listener invocation driven by this emitter
    /// is on the stack. One slot, not a stack: a nested `emit` overwrites
    /// it and clears it when the inner cycle ends.
    current: RefCell<Option<CurrentSubscription>>,
}

impl<A> EmitterShared<A> {
    /// Removes the subscription currently being dispatched.
    pub(super) fn remove_current(&self) -> Result<(), EmitterError> {
        let (event_type, key) = {
            let current = self.current.borrow();
            match current.as_ref() {
                Some(cur) => (Rc::clone(&cur.event_type), cur.key),
                None => return Err(EmitterError::NoCurrentSubscription),
            }
        };
        self.registry.remove_by_key(&event_type, key);
        Ok(())
    }
}

/// Synchronous in-process event emitter.
///
/// Listeners are registered against named event types; `emit` delivers a
/// payload to every listener of one type, in registration order, on the
/// caller's stack.
///
/// ### Properties
/// - **Cloneable**: cheap to clone (internally holds an `Rc`-backed state
///   block); clones publish to and mutate the same subscriptions.
/// - **Single-threaded**: not `Send`, not `Sync`, no locking. Reentrancy is
///   tolerated; parallelism does not exist.
/// - **No delivery coupling**: one emitter delivers one payload type `A`;
///   event types partition the listeners, never the payload shape.
///
/// ## Example
/// ```rust
/// use eventbox::EventEmitter;
///
/// let emitter: EventEmitter<String> = EventEmitter::new();
/// let sub = emitter
///     .add_listener("greeting", |msg: &String| {
///         assert_eq!(msg, "hello");
///     })
///     .unwrap();
///
/// emitter.emit("greeting", &"hello".to_string());
/// sub.remove();
/// assert!(emitter.listeners("greeting").is_empty());
/// ```
pub struct EventEmitter<A> {
    shared: Rc<EmitterShared<A>>,
}

impl<A> EventEmitter<A> {
    /// Creates an emitter with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Rc::new(EmitterShared {
                registry: SubscriptionRegistry::new(),
                current: RefCell::new(None),
            }),
        }
    }

    /// Adds a listener to be invoked when events of `event_type` are
    /// emitted, ordered after all listeners already registered for it.
    ///
    /// Returns the [`Subscription`] handle so the caller may remove this
    /// registration individually later. Registering the same callable twice
    /// produces two independent subscriptions, each delivered separately.
    ///
    /// # Errors
    /// [`EmitterError::EmptyEventType`] when `event_type` is empty.
    pub fn add_listener<L>(
        &self,
        event_type: impl Into<Rc<str>>,
        listener: L,
    ) -> Result<Subscription<A>, EmitterError>
    where
        L: Listener<A> + 'static,
    {
        self.shared.registry.add(event_type, listener)
    }

    /// Similar to [`add_listener`], except that the listener is removed
    /// after it is invoked once.
    ///
    /// The wrapper deregisters itself *before* forwarding, so the listener
    /// is gone even if it never touches the emitter — and a listener that
    /// re-emits its own event type cannot fire itself again.
    ///
    /// # Errors
    /// [`EmitterError::EmptyEventType`] when `event_type` is empty.
    ///
    /// [`add_listener`]: EventEmitter::add_listener
    pub fn once<L>(
        &self,
        event_type: impl Into<Rc<str>>,
        listener: L,
    ) -> Result<Subscription<A>, EmitterError>
    where
        A: 'static,
        L: Listener<A> + 'static,
    {
        let wrapper = OnceListener::new(Rc::downgrade(&self.shared), listener);
        self.shared.registry.add(event_type, wrapper)
    }

    /// Emits an event of the given type. All listeners of that type are
    /// notified synchronously, in registration order, each receiving `args`.
    ///
    /// An event type with zero subscriptions is a silent no-op. Listeners
    /// registered for the type during this call are not invoked until the
    /// next `emit`; listeners removed during this call are skipped. A
    /// panicking listener propagates and the remaining listeners of this
    /// cycle are not invoked.
    pub fn emit(&self, event_type: &str, args: &A) {
        let (event_type, keys) = match self.shared.registry.snapshot(event_type) {
            Some(snapshot) => snapshot,
            None => return,
        };

        for key in keys {
            // The subscription may have been removed during this cycle.
            if let Some(listener) = self.shared.registry.get(&event_type, key) {
                *self.shared.current.borrow_mut() = Some(CurrentSubscription {
                    event_type: Rc::clone(&event_type),
                    key,
                });
                listener.on_event(args);
            }
        }
        *self.shared.current.borrow_mut() = None;
    }

    /// Removes the listener whose invocation is currently in progress.
    ///
    /// Only meaningful from inside a listener driven by this emitter's
    /// [`emit`]: that is the one moment the emitter knows which subscription
    /// is active, which lets a listener deregister itself without holding
    /// its own [`Subscription`] handle.
    ///
    /// # Errors
    /// [`EmitterError::NoCurrentSubscription`] when no listener invocation
    /// is in progress — including from a listener that already ran a nested
    /// `emit`, since the inner cycle clears the shared slot on completion.
    ///
    /// [`emit`]: EventEmitter::emit
    pub fn remove_current_listener(&self) -> Result<(), EmitterError> {
        self.shared.remove_current()
    }

    /// Removes all registered listeners of `event_type`, leaving other
    /// types untouched.
    pub fn remove_all_listeners(&self, event_type: &str) {
        self.shared.registry.remove_all_of_type(event_type);
    }

    /// Removes all registered listeners of every event type.
    pub fn remove_all(&self) {
        self.shared.registry.remove_all();
    }

    /// Returns the listeners currently registered for `event_type`, in
    /// delivery order.
    ///
    /// The result is a snapshot: removing subscriptions afterwards does not
    /// retroactively change it.
    pub fn listeners(&self, event_type: &str) -> Vec<Rc<dyn Listener<A>>> {
        self.shared.registry.listeners_for(event_type)
    }

    /// Number of listeners currently registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.shared.registry.count_for(event_type)
    }

    /// Returns the sorted list of event types with at least one listener.
    pub fn event_types(&self) -> Vec<Rc<str>> {
        self.shared.registry.event_types()
    }

    /// Creates a non-owning handle to this emitter.
    ///
    /// Listeners that call back into their own emitter should capture a
    /// [`WeakEmitter`] instead of a clone: a registered listener owning its
    /// emitter is a reference cycle.
    #[must_use]
    pub fn downgrade(&self) -> WeakEmitter<A> {
        WeakEmitter {
            shared: Rc::downgrade(&self.shared),
        }
    }
}

impl<A> Clone for EventEmitter<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A> Default for EventEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventEmitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("registry", &self.shared.registry)
            .field("emitting", &self.shared.current.borrow().is_some())
            .finish()
    }
}

/// Non-owning handle to an [`EventEmitter`].
///
/// Obtained from [`EventEmitter::downgrade`]; [`WeakEmitter::upgrade`]
/// returns `None` once every strong handle has been dropped.
pub struct WeakEmitter<A> {
    shared: Weak<EmitterShared<A>>,
}

impl<A> WeakEmitter<A> {
    /// Attempts to reacquire a strong emitter handle.
    pub fn upgrade(&self) -> Option<EventEmitter<A>> {
        self.shared.upgrade().map(|shared| EventEmitter { shared })
    }
}

impl<A> Clone for WeakEmitter<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<A> fmt::Debug for WeakEmitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakEmitter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn recorder(log: &Log, tag: &'static str) -> impl Fn(&String) {
        let log = Rc::clone(log);
        move |msg: &String| log.borrow_mut().push(format!("{tag}:{msg}"))
    }

    #[test]
    fn test_emit_without_listeners_is_a_noop() {
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.emit("ping", &"x".to_string());
        assert!(emitter.event_types().is_empty());
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.add_listener("ping", recorder(&log, "l1")).unwrap();
        emitter.add_listener("ping", recorder(&log, "l2")).unwrap();

        emitter.emit("ping", &"x".to_string());

        assert_eq!(*log.borrow(), vec!["l1:x", "l2:x"]);
    }

    #[test]
    fn test_emit_is_scoped_by_event_type() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.add_listener("ping", recorder(&log, "ping")).unwrap();

        emitter.emit("pong", &"x".to_string());

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_same_callable_registered_twice_fires_twice() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.add_listener("ping", recorder(&log, "dup")).unwrap();
        emitter.add_listener("ping", recorder(&log, "dup")).unwrap();

        emitter.emit("ping", &"x".to_string());

        assert_eq!(*log.borrow(), vec!["dup:x", "dup:x"]);
    }

    #[test]
    fn test_subscription_remove_stops_delivery() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let sub = emitter.add_listener("ping", recorder(&log, "l1")).unwrap();

        emitter.emit("ping", &"a".to_string());
        sub.remove();
        emitter.emit("ping", &"b".to_string());

        assert_eq!(*log.borrow(), vec!["l1:a"]);
    }

    #[test]
    fn test_listener_can_remove_a_later_listener_mid_cycle() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let victim: Rc<RefCell<Option<Subscription<String>>>> = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&log);
        let target = Rc::clone(&victim);
        emitter
            .add_listener("ping", move |msg: &String| {
                sink.borrow_mut().push(format!("first:{msg}"));
                if let Some(sub) = target.borrow().as_ref() {
                    sub.remove();
                }
            })
            .unwrap();
        emitter.add_listener("ping", recorder(&log, "second")).unwrap();
        let third = emitter.add_listener("ping", recorder(&log, "third")).unwrap();
        emitter.add_listener("ping", recorder(&log, "fourth")).unwrap();
        *victim.borrow_mut() = Some(third);

        emitter.emit("ping", &"x".to_string());

        // Neighbors before and after the removed listener still run.
        assert_eq!(*log.borrow(), vec!["first:x", "second:x", "fourth:x"]);
        assert_eq!(emitter.listener_count("ping"), 3);
    }

    #[test]
    fn test_mid_cycle_additions_wait_for_the_next_cycle() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let weak = emitter.downgrade();

        let sink = Rc::clone(&log);
        emitter
            .add_listener("ping", move |msg: &String| {
                sink.borrow_mut().push(format!("adder:{msg}"));
                if let Some(emitter) = weak.upgrade() {
                    let late_sink = Rc::clone(&sink);
                    emitter
                        .add_listener("ping", move |msg: &String| {
                            late_sink.borrow_mut().push(format!("late:{msg}"));
                        })
                        .unwrap();
                }
            })
            .unwrap();

        emitter.emit("ping", &"a".to_string());
        assert_eq!(*log.borrow(), vec!["adder:a"]);

        emitter.emit("ping", &"b".to_string());
        // The listener added during cycle "a" fires in cycle "b"; the one
        // added during cycle "b" does not.
        assert_eq!(*log.borrow(), vec!["adder:a", "adder:b", "late:b"]);
    }

    #[test]
    fn test_once_fires_exactly_once() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.once("ping", recorder(&log, "once")).unwrap();
        assert_eq!(emitter.listener_count("ping"), 1);

        emitter.emit("ping", &"a".to_string());
        emitter.emit("ping", &"b".to_string());

        assert_eq!(*log.borrow(), vec!["once:a"]);
        assert!(emitter.listeners("ping").is_empty());
    }

    #[test]
    fn test_once_listener_re_emitting_its_own_type_does_not_recurse() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let weak = emitter.downgrade();

        let sink = Rc::clone(&log);
        emitter
            .once("ping", move |msg: &String| {
                sink.borrow_mut().push(format!("once:{msg}"));
                if let Some(emitter) = weak.upgrade() {
                    emitter.emit("ping", msg);
                }
            })
            .unwrap();

        emitter.emit("ping", &"x".to_string());

        assert_eq!(*log.borrow(), vec!["once:x"]);
    }

    #[test]
    fn test_listener_can_remove_itself_mid_cycle() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let weak = emitter.downgrade();

        let sink = Rc::clone(&log);
        emitter
            .add_listener("ping", move |msg: &String| {
                sink.borrow_mut().push(format!("self:{msg}"));
                let emitter = weak.upgrade().expect("emitter is alive during dispatch");
                emitter.remove_current_listener().unwrap();
            })
            .unwrap();
        emitter.add_listener("ping", recorder(&log, "second")).unwrap();

        emitter.emit("ping", &"a".to_string());
        assert_eq!(*log.borrow(), vec!["self:a", "second:a"]);
        assert_eq!(emitter.listener_count("ping"), 1);

        emitter.emit("ping", &"b".to_string());
        assert_eq!(*log.borrow(), vec!["self:a", "second:a", "second:b"]);
    }

    #[test]
    fn test_remove_current_listener_outside_dispatch_fails() {
        let emitter: EventEmitter<String> = EventEmitter::new();
        assert_eq!(
            emitter.remove_current_listener(),
            Err(EmitterError::NoCurrentSubscription)
        );

        // A completed cycle clears the slot again.
        emitter.add_listener("ping", |_: &String| {}).unwrap();
        emitter.emit("ping", &"x".to_string());
        assert_eq!(
            emitter.remove_current_listener(),
            Err(EmitterError::NoCurrentSubscription)
        );
    }

    #[test]
    fn test_nested_emit_clears_the_current_slot() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let weak = emitter.downgrade();
        let results: Rc<RefCell<Vec<Result<(), EmitterError>>>> =
            Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        let outcomes = Rc::clone(&results);
        emitter
            .add_listener("outer", move |msg: &String| {
                sink.borrow_mut().push(format!("outer:{msg}"));
                let emitter = weak.upgrade().expect("emitter is alive during dispatch");
                emitter.emit("inner", msg);
                // The inner cycle cleared the shared slot on completion, so
                // the outer listener can no longer remove itself.
                outcomes.borrow_mut().push(emitter.remove_current_listener());
            })
            .unwrap();
        emitter.add_listener("inner", recorder(&log, "inner")).unwrap();

        emitter.emit("outer", &"x".to_string());

        assert_eq!(*log.borrow(), vec!["outer:x", "inner:x"]);
        assert_eq!(
            *results.borrow(),
            vec![Err(EmitterError::NoCurrentSubscription)]
        );
        assert_eq!(emitter.listener_count("outer"), 1);
    }

    #[test]
    fn test_nested_emit_runs_inline() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let weak = emitter.downgrade();

        let sink = Rc::clone(&log);
        emitter
            .add_listener("outer", move |msg: &String| {
                sink.borrow_mut().push("outer:start".to_string());
                if let Some(emitter) = weak.upgrade() {
                    emitter.emit("inner", msg);
                }
                sink.borrow_mut().push("outer:end".to_string());
            })
            .unwrap();
        emitter.add_listener("inner", recorder(&log, "inner")).unwrap();

        emitter.emit("outer", &"x".to_string());

        assert_eq!(
            *log.borrow(),
            vec!["outer:start", "inner:x", "outer:end"]
        );
    }

    #[test]
    fn test_remove_all_listeners_is_type_scoped() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.add_listener("ping", recorder(&log, "ping")).unwrap();
        emitter.add_listener("pong", recorder(&log, "pong")).unwrap();

        emitter.remove_all_listeners("ping");

        emitter.emit("ping", &"x".to_string());
        emitter.emit("pong", &"x".to_string());
        assert_eq!(*log.borrow(), vec!["pong:x"]);
    }

    #[test]
    fn test_remove_all_clears_every_type() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.add_listener("ping", recorder(&log, "ping")).unwrap();
        emitter.add_listener("pong", recorder(&log, "pong")).unwrap();

        emitter.remove_all();

        emitter.emit("ping", &"x".to_string());
        emitter.emit("pong", &"x".to_string());
        assert!(log.borrow().is_empty());
        assert!(emitter.event_types().is_empty());
    }

    #[test]
    fn test_listeners_snapshot_is_not_retroactive() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        emitter.add_listener("ping", recorder(&log, "l1")).unwrap();

        let snapshot = emitter.listeners("ping");
        emitter.remove_all();

        assert_eq!(snapshot.len(), 1);
        snapshot[0].on_event(&"direct".to_string());
        assert_eq!(*log.borrow(), vec!["l1:direct"]);
    }

    #[test]
    fn test_panicking_listener_aborts_the_cycle() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();

        let sink = Rc::clone(&log);
        emitter
            .add_listener("ping", move |msg: &String| {
                sink.borrow_mut().push(format!("first:{msg}"));
                panic!("listener failure");
            })
            .unwrap();
        emitter.add_listener("ping", recorder(&log, "second")).unwrap();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            emitter.emit("ping", &"x".to_string());
        }));

        assert!(outcome.is_err());
        assert_eq!(*log.borrow(), vec!["first:x"]);
    }

    #[test]
    fn test_clones_share_the_same_subscriptions() {
        let log = log();
        let emitter: EventEmitter<String> = EventEmitter::new();
        let clone = emitter.clone();

        clone.add_listener("ping", recorder(&log, "l1")).unwrap();
        emitter.emit("ping", &"x".to_string());

        assert_eq!(*log.borrow(), vec!["l1:x"]);
    }

    #[test]
    fn test_weak_emitter_dies_with_the_last_strong_handle() {
        let emitter: EventEmitter<String> = EventEmitter::new();
        let weak = emitter.downgrade();

        assert!(weak.upgrade().is_some());
        drop(emitter);
        assert!(weak.upgrade().is_none());
    }
}
