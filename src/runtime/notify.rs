//! Observer registration for component notifications.
//!
//! The mood machine and the playback coordinator each own a [`Notifier`] and
//! push their notifications through it, fire-and-forget: observers cannot veto
//! or acknowledge. The UI layer subscribes at startup; tests subscribe with a
//! capturing closure.

use std::fmt;

/// A list of registered observers for one component's event type.
pub struct Notifier<E> {
    observers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Notifier<E> {
    /// Creates a notifier with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    /// Registers an observer called for every subsequent event, in
    /// registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&E) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Delivers `event` to every registered observer.
    pub fn emit(&mut self, event: &E) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}
