//! Synchronous state-change notification.
//!
//! Observers run on the caller's thread, in subscription order, each time the
//! controller replaces its snapshot. A callback must not subscribe or
//! unsubscribe on the registry that is notifying it.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::state::MatchState;

pub trait MatchObserver: Send {
    fn on_state_changed(&mut self, state: &Arc<MatchState>);
}

impl<F> MatchObserver for F
where
    F: FnMut(&Arc<MatchState>) + Send,
{
    fn on_state_changed(&mut self, state: &Arc<MatchState>) {
        self(state)
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    observers: Vec<(u64, Box<dyn MatchObserver>)>,
}

/// Shared list of observers. Clones refer to the same list.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    inner: Arc<Mutex<Inner>>,
}

/// Keeps an observer registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the observer"]
pub struct Subscription {
    registry: Weak<Mutex<Inner>>,
    id: u64,
    active: bool,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: impl MatchObserver + 'static) -> Subscription {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Box::new(observer)));
        tracing::debug!("Observer {} subscribed ({} total)", id, inner.observers.len());
        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
            active: true,
        }
    }

    pub fn notify(&self, state: &Arc<MatchState>) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, observer) in inner.observers.iter_mut() {
            observer.on_state_changed(state);
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observers
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(inner: &Mutex<Inner>, id: u64) {
        let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.observers.retain(|(oid, _)| *oid != id);
    }
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keep the observer registered for the registry's whole lifetime.
    pub fn detach(mut self) {
        self.active = false;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Some(inner) = self.registry.upgrade() {
            ObserverRegistry::remove(&inner, self.id);
            tracing::debug!("Observer {} unsubscribed", self.id);
        }
    }
}
