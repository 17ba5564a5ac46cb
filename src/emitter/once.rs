//! Single-fire listener wrapper used by `EventEmitter::once`.

use std::rc::Weak;

use crate::listeners::Listener;

use super::core::EmitterShared;

/// Wrapper that deregisters its own subscription on first delivery, then
/// forwards to the wrapped listener.
///
/// Holds the emitter weakly: a never-fired once-listener must not keep the
/// emitter alive through its own registry.
pub(super) struct OnceListener<A, L> {
    emitter: Weak<EmitterShared<A>>,
    inner: L,
}

impl<A, L> OnceListener<A, L> {
    pub(super) fn new(emitter: Weak<EmitterShared<A>>, inner: L) -> Self {
        Self { emitter, inner }
    }
}

impl<A, L> Listener<A> for OnceListener<A, L>
where
    L: Listener<A>,
{
    fn on_event(&self, args: &A) {
        // Deregister first: for the whole invocation the current slot points
        // at this wrapper's own subscription, and forwarding last keeps a
        // re-emitting inner listener from being delivered twice.
        if let Some(emitter) = self.emitter.upgrade() {
            let _ = emitter.remove_current();
        }
        self.inner.on_event(args);
    }
}
