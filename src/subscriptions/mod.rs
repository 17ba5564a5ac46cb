//! # Subscription storage: keyed, ordered, reentrancy-safe.
//!
//! [`SubscriptionRegistry`] owns the mapping from event type to the ordered
//! set of live subscriptions for that type. [`Subscription`] is the keyed
//! handle a registration returns; [`SubscriptionKey`] is the opaque stable
//! identifier the registry assigns.
//!
//! Storage is keyed (map-like), not a plain list: removing one subscription
//! while its type is being iterated leaves a hole instead of shifting
//! neighbors, which is what makes removal during dispatch well-defined.

mod registry;
mod subscription;

pub use registry::SubscriptionRegistry;
pub use subscription::{Subscription, SubscriptionKey};
