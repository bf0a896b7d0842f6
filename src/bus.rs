//! Typed publish/subscribe handle
//!
//! Single-threaded: every clone of an [`EventBus`] shares the same mailboxes.
//! Each subscriber gets its own FIFO mailbox; `publish` copies the event into
//! every live mailbox and the subscriber drains it on its own tick.
//!
//! The bus is created by whoever owns the scene and handed to components at
//! construction. Dropping the last handle drops every undelivered event.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

/// Opaque subscriber identity, allocated by [`EventBus::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

struct BusInner<E> {
    /// Live mailboxes, keyed by subscriber (stable iteration order)
    mailboxes: BTreeMap<SubscriberId, VecDeque<E>>,
    /// Next subscriber ID
    next_id: u64,
}

/// Cloneable handle to a shared event bus
pub struct EventBus<E> {
    inner: Rc<RefCell<BusInner<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                mailboxes: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Allocate a subscriber ID (not yet subscribed)
    pub fn register(&self) -> SubscriberId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriberId(inner.next_id);
        inner.next_id += 1;
        id
    }

    /// Open a mailbox for `id`. Returns false if it was already subscribed.
    pub fn subscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.mailboxes.contains_key(&id) {
            return false;
        }
        inner.mailboxes.insert(id, VecDeque::new());
        true
    }

    /// Close the mailbox for `id`, discarding anything undelivered.
    /// Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.borrow_mut().mailboxes.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.inner.borrow().mailboxes.contains_key(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().mailboxes.len()
    }

    /// Deliver `event` to every subscriber. Returns the number of recipients.
    pub fn publish(&self, event: E) -> usize {
        let mut inner = self.inner.borrow_mut();
        let recipients = inner.mailboxes.len();
        for mailbox in inner.mailboxes.values_mut() {
            mailbox.push_back(event.clone());
        }
        recipients
    }

    /// Take every pending event for `id`, oldest first
    pub fn drain(&self, id: SubscriberId) -> Vec<E> {
        self.inner
            .borrow_mut()
            .mailboxes
            .get_mut(&id)
            .map(|mailbox| mailbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of events waiting for `id`
    pub fn pending(&self, id: SubscriberId) -> usize {
        self.inner
            .borrow()
            .mailboxes
            .get(&id)
            .map(VecDeque::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_every_subscriber_in_order() {
        let bus: EventBus<u32> = EventBus::new();
        let a = bus.register();
        let b = bus.register();
        assert!(bus.subscribe(a));
        assert!(bus.subscribe(b));

        assert_eq!(bus.publish(1), 2);
        assert_eq!(bus.publish(2), 2);

        assert_eq!(bus.drain(a), vec![1, 2]);
        assert_eq!(bus.drain(b), vec![1, 2]);
        assert!(bus.drain(a).is_empty());
    }

    #[test]
    fn test_double_subscribe_does_not_duplicate() {
        let bus: EventBus<u32> = EventBus::new();
        let id = bus.register();
        assert!(bus.subscribe(id));
        assert!(!bus.subscribe(id));
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(7);
        assert_eq!(bus.drain(id), vec![7]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let bus: EventBus<u32> = EventBus::new();
        let id = bus.register();
        assert!(!bus.unsubscribe(id));
        bus.subscribe(id);
        bus.publish(3);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        // Undelivered events are discarded, later ones never arrive
        assert_eq!(bus.publish(4), 0);
        assert!(bus.drain(id).is_empty());
    }

    #[test]
    fn test_clones_share_mailboxes() {
        let bus: EventBus<&'static str> = EventBus::new();
        let handle = bus.clone();
        let id = bus.register();
        bus.subscribe(id);

        handle.publish("hello");
        assert_eq!(bus.pending(id), 1);
        assert_eq!(bus.drain(id), vec!["hello"]);
    }
}
