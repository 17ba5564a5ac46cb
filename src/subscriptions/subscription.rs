//! # Subscription handle and key.
//!
//! [`Subscription`] binds one event type, one stored listener, and the key
//! the registry assigned at registration. It is immutable after creation;
//! its only lifecycle operation is [`Subscription::remove`].
//!
//! The handle holds a `Weak` back-reference to the registry storage: a
//! relation, never ownership. Dropping the handle does **not** remove the
//! listener; dropping the registry makes the handle inert.

use std::fmt;
use std::rc::{Rc, Weak};

use super::registry::RegistryShared;

/// Opaque stable identifier of one subscription.
///
/// Keys are allocated from a monotonic counter shared by all event types of
/// one registry and are never reused, so a stale handle can never remove a
/// later registration by accident. Key order is insertion order, which is
/// also delivery order within an event type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionKey(pub(crate) u64);

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to one live listener registration.
///
/// Created only by registry/emitter `add` operations — construction and
/// registration are a single step from the caller's point of view.
///
/// ### Properties
/// - **Terminal removal**: [`Subscription::remove`] is idempotent; a second
///   call is a no-op, never an error.
/// - **Non-owning**: the handle does not keep the registry alive. Removal
///   through a handle that outlived its registry is a no-op.
/// - **No drop magic**: letting the handle go out of scope leaves the
///   listener registered.
pub struct Subscription<A> {
    pub(crate) registry: Weak<RegistryShared<A>>,
    pub(crate) event_type: Rc<str>,
    pub(crate) key: SubscriptionKey,
}

impl<A> Subscription<A> {
    /// The event type this subscription is registered under.
    #[inline]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The key the registry assigned at registration.
    #[inline]
    pub fn key(&self) -> SubscriptionKey {
        self.key
    }

    /// Removes this subscription from its registry.
    ///
    /// Idempotent: removing an already-removed subscription, or one whose
    /// registry has been dropped, does nothing. A removal that leaves the
    /// event type without subscriptions prunes the type entry entirely.
    pub fn remove(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove_entry(&self.event_type, self.key);
        }
    }
}

impl<A> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_type", &self.event_type)
            .field("key", &self.key)
            .finish()
    }
}
