//! Publish-subscribe delivery of [`GameEvent`]s.
//!
//! Observers subscribe once, receive every event published afterwards in
//! publication order, and are dropped on [`EventBus::unsubscribe`].

use std::fmt;

use iconforge_types::GameEvent;

/// Receives published events.
pub trait EventObserver {
    /// Handle one event.
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Fan-out of events to subscribed observers.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(SubscriptionId, Box<dyn EventObserver>)>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl EventBus {
    /// Create a bus with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer`.
    pub fn subscribe(&mut self, observer: Box<dyn EventObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.observers.push((id, observer));
        id
    }

    /// Remove the observer registered as `id`. Returns `false` if none was.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Deliver `event` to every observer.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, observer) in &mut self.observers {
            observer.on_event(event);
        }
    }

    /// Return the number of observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Return whether there are no observers.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
