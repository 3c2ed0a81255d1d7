//! Explicit subscription over a mutable input value.
//!
//! A subscriber is a function registered against one cell. It runs once on
//! registration and again, synchronously, every time the cell's value
//! changes. Whatever cleanup it returns runs before its next invocation, on
//! `unsubscribe`, and when the cell is dropped; the cleanup is told which of
//! those it is.

use reel_logging::reel_trace;

/// Why a pending cleanup is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupReason {
    /// The value changed; the subscriber runs again right after.
    Rerun,
    /// The subscription is gone (`unsubscribe` or the cell was dropped).
    Teardown,
}

/// Action run before a subscriber's next invocation or on teardown.
pub type Cleanup = Box<dyn FnOnce(CleanupReason)>;

pub type SubscriptionId = u64;

struct Subscriber<T> {
    id: SubscriptionId,
    effect: Box<dyn FnMut(&T) -> Option<Cleanup>>,
    pending_cleanup: Option<Cleanup>,
}

impl<T> Subscriber<T> {
    fn run_cleanup(&mut self, reason: CleanupReason) {
        if let Some(cleanup) = self.pending_cleanup.take() {
            cleanup(reason);
        }
    }
}

/// Input value owned by the surrounding UI, observed by controllers.
pub struct InputCell<T> {
    value: T,
    next_id: SubscriptionId,
    subscribers: Vec<Subscriber<T>>,
}

impl<T: PartialEq> InputCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Registers `effect` and invokes it immediately with the current value.
    pub fn subscribe<F>(&mut self, effect: F) -> SubscriptionId
    where
        F: FnMut(&T) -> Option<Cleanup> + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let mut effect: Box<dyn FnMut(&T) -> Option<Cleanup>> = Box::new(effect);
        let pending_cleanup = effect(&self.value);
        self.subscribers.push(Subscriber {
            id,
            effect,
            pending_cleanup,
        });
        reel_trace!("cell subscription {} registered", id);
        id
    }

    /// Stores `value` and re-runs every subscriber if it differs from the current one.
    ///
    /// Returns whether the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;

        let current = &self.value;
        for subscriber in self.subscribers.iter_mut() {
            subscriber.run_cleanup(CleanupReason::Rerun);
            subscriber.pending_cleanup = (subscriber.effect)(current);
        }
        true
    }

    /// Removes a subscription, running its pending cleanup. Returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(index) = self.subscribers.iter().position(|s| s.id == id) else {
            return false;
        };
        let mut subscriber = self.subscribers.remove(index);
        subscriber.run_cleanup(CleanupReason::Teardown);
        reel_trace!("cell subscription {} removed", id);
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Drop for InputCell<T> {
    fn drop(&mut self) {
        for mut subscriber in self.subscribers.drain(..) {
            subscriber.run_cleanup(CleanupReason::Teardown);
        }
    }
}
