//! # Subscription registry - keyed storage behind every emitter.
//!
//! [`SubscriptionRegistry`] maps each event type to the ordered collection
//! of its live subscriptions and assigns every registration a stable
//! [`SubscriptionKey`].
//!
//! ## Architecture
//! ```text
//! add(type, listener) ──► { type ──► BTreeMap<key, listener> }
//!                                        │
//! snapshot(type) ────────► Vec<key>      │   (fixes one dispatch cycle)
//! get(type, key) ────────────────────────┘   (re-checked per step)
//! ```
//!
//! ## Rules
//! - Storage is keyed, not positional: removing subscription *i* during
//!   iteration leaves a hole instead of shifting *i+1..n*, so an iterating
//!   dispatcher can neither skip nor double-invoke a neighbor.
//! - Keys come from one monotonic counter and are never reused; insertion
//!   order, key order, and delivery order coincide.
//! - A type entry with zero subscriptions is pruned. Every query treats an
//!   absent entry as "no subscribers", so absent and empty are
//!   indistinguishable to callers.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::error::EmitterError;
use crate::listeners::Listener;

use super::subscription::{Subscription, SubscriptionKey};

/// Live subscriptions of one event type, in insertion order.
type TypeSubscriptions<A> = BTreeMap<SubscriptionKey, Rc<dyn Listener<A>>>;

/// Storage shared between the registry and the handles it issues.
///
/// Subscriptions back-reference this through `Weak`, so a handle can remove
/// itself without keeping the registry alive.
pub(crate) struct RegistryShared<A> {
    types: RefCell<HashMap<Rc<str>, TypeSubscriptions<A>>>,
    next_key: Cell<u64>,
}

impl<A> RegistryShared<A> {
    fn allocate_key(&self) -> SubscriptionKey {
        let key = self.next_key.get();
        self.next_key.set(key + 1);
        SubscriptionKey(key)
    }

    /// Deletes one entry; prunes the type collection if it became empty.
    pub(crate) fn remove_entry(&self, event_type: &str, key: SubscriptionKey) {
        let mut types = self.types.borrow_mut();
        if let Some(subs) = types.get_mut(event_type) {
            subs.remove(&key);
            if subs.is_empty() {
                types.remove(event_type);
            }
        }
    }
}

/// Registry of live subscriptions, keyed by event type.
///
/// ### Properties
/// - **Single-threaded**: interior mutability via `RefCell`/`Cell`, no
///   locking. The registry is not `Send` and not `Sync`.
/// - **Reentrancy-safe by construction**: no method holds a storage borrow
///   while running caller code, so listeners invoked by a dispatcher may
///   call back into the registry freely.
pub struct SubscriptionRegistry<A> {
    shared: Rc<RegistryShared<A>>,
}

impl<A> SubscriptionRegistry<A> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RegistryShared {
                types: RefCell::new(HashMap::new()),
                next_key: Cell::new(0),
            }),
        }
    }

    /// Registers `listener` under `event_type` and returns the keyed handle.
    ///
    /// The subscription is immediately visible to [`listeners_for`] and to
    /// any future dispatch cycle for that type, ordered after all
    /// previously-added same-type subscriptions. A dispatch cycle already in
    /// progress keeps its snapshot and will not see it.
    ///
    /// # Errors
    /// [`EmitterError::EmptyEventType`] when `event_type` is the empty
    /// string; the registration that would never match any emit is
    /// rejected up front.
    ///
    /// [`listeners_for`]: SubscriptionRegistry::listeners_for
    pub fn add<L>(
        &self,
        event_type: impl Into<Rc<str>>,
        listener: L,
    ) -> Result<Subscription<A>, EmitterError>
    where
        L: Listener<A> + 'static,
    {
        let event_type: Rc<str> = event_type.into();
        if event_type.is_empty() {
            return Err(EmitterError::EmptyEventType);
        }

        let key = self.shared.allocate_key();
        self.shared
            .types
            .borrow_mut()
            .entry(Rc::clone(&event_type))
            .or_default()
            .insert(key, Rc::new(listener));

        Ok(Subscription {
            registry: Rc::downgrade(&self.shared),
            event_type,
            key,
        })
    }

    /// Removes one subscription.
    ///
    /// Idempotent: an already-removed subscription, or one issued by a
    /// different registry, is silently ignored.
    pub fn remove(&self, subscription: &Subscription<A>) {
        if !subscription.registry.ptr_eq(&Rc::downgrade(&self.shared)) {
            return;
        }
        self.shared
            .remove_entry(&subscription.event_type, subscription.key);
    }

    /// Removes every live subscription of `event_type` in one step.
    pub fn remove_all_of_type(&self, event_type: &str) {
        self.shared.types.borrow_mut().remove(event_type);
    }

    /// Removes every live subscription of every type.
    pub fn remove_all(&self) {
        self.shared.types.borrow_mut().clear();
    }

    /// Returns the listeners of `event_type` in delivery order.
    ///
    /// The returned vector is a snapshot: mutating the registry afterwards
    /// does not change it. An unknown type yields an empty vector.
    pub fn listeners_for(&self, event_type: &str) -> Vec<Rc<dyn Listener<A>>> {
        self.shared
            .types
            .borrow()
            .get(event_type)
            .map(|subs| subs.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of live subscriptions across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared
            .types
            .borrow()
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    /// True if no subscription is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.types.borrow().is_empty()
    }

    /// Number of live subscriptions of `event_type`.
    pub fn count_for(&self, event_type: &str) -> usize {
        self.shared
            .types
            .borrow()
            .get(event_type)
            .map_or(0, BTreeMap::len)
    }

    /// Returns the sorted list of event types with at least one
    /// subscription.
    pub fn event_types(&self) -> Vec<Rc<str>> {
        let types = self.shared.types.borrow();
        let mut names: Vec<Rc<str>> = types.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    // ---------------------------
    // Dispatch support
    // ---------------------------

    /// Fixes the dispatch set of one emission cycle: the interned type name
    /// plus the keys live at this instant, in delivery order.
    ///
    /// Returns `None` when the type has no subscriptions.
    pub(crate) fn snapshot(&self, event_type: &str) -> Option<(Rc<str>, Vec<SubscriptionKey>)> {
        let types = self.shared.types.borrow();
        let (name, subs) = types.get_key_value(event_type)?;
        Some((Rc::clone(name), subs.keys().copied().collect()))
    }

    /// Re-fetches one subscription by key, if it is still live.
    pub(crate) fn get(
        &self,
        event_type: &str,
        key: SubscriptionKey,
    ) -> Option<Rc<dyn Listener<A>>> {
        self.shared
            .types
            .borrow()
            .get(event_type)
            .and_then(|subs| subs.get(&key))
            .cloned()
    }

    /// Removes one subscription by its type and key.
    pub(crate) fn remove_by_key(&self, event_type: &str, key: SubscriptionKey) {
        self.shared.remove_entry(event_type, key);
    }
}

impl<A> Default for SubscriptionRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for SubscriptionRegistry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("event_types", &self.shared.types.borrow().len())
            .field("subscriptions", &self.len())
            .finish()
    }
}
