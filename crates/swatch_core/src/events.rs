//! Event dispatch system
//!
//! A single-threaded publish/subscribe bus. Components push typed events onto
//! the queue while they handle other events; the owner drains the queue in
//! FIFO order, routes each event to its own components, then notifies the
//! external subscribers.

use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;

new_key_type! {
    /// Handle returned by [`EventBus::subscribe`]
    pub struct SubscriptionId;
}

/// Subscriber callback
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Queue plus subscriber registry for one event vocabulary
pub struct EventBus<E> {
    queue: VecDeque<E>,
    listeners: SlotMap<SubscriptionId, Listener<E>>,
    /// Upper bound on events drained by one dispatch pass
    limit: usize,
}

impl<E> EventBus<E> {
    /// Default cap on events processed by one drain loop
    pub const DEFAULT_LIMIT: usize = 4096;

    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            listeners: SlotMap::with_key(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Set the maximum number of events a single drain loop may process
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Queue an event for the next dispatch pass
    pub fn emit(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Take the oldest pending event
    pub fn pop(&mut self) -> Option<E> {
        self.queue.pop_front()
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every queued event without delivering it
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Register a listener that observes every dispatched event
    pub fn subscribe<F: FnMut(&E) + 'static>(&mut self, listener: F) -> SubscriptionId {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a listener, returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to every subscriber
    pub fn notify(&mut self, event: &E) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("queue", &self.queue)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
