//! Typed notification channels.
//!
//! Each channel keeps its listeners in subscription order and invokes them
//! synchronously when a value is emitted. Controllers own their channels, so
//! every listener has run by the time the emitting call returns.

use tracing::{debug, instrument};

/// Handle returned by [`Channel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A named notification channel carrying values of type `T`.
pub struct Channel<T> {
    name: &'static str,
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Channel<T> {
    /// Creates a channel with no listeners.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Adds a listener after all existing ones.
    #[instrument(skip(self, listener), fields(channel = self.name))]
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(listeners = self.listeners.len(), "Listener subscribed");
        id
    }

    /// Removes a listener. Returns false if it was not subscribed.
    #[instrument(skip(self), fields(channel = self.name))]
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = self.listeners.len() < before;
        debug!(removed, "Listener unsubscribe");
        removed
    }

    /// Number of subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Invokes every listener with `value`, in subscription order.
    #[instrument(skip(self, value), fields(channel = self.name, listeners = self.listeners.len()))]
    pub(crate) fn emit(&mut self, value: &T) {
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }
}

impl<T> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = Channel::<u32>::new("numbers");

        let first = Rc::clone(&log);
        channel.subscribe(move |n| first.borrow_mut().push(format!("first {n}")));
        let second = Rc::clone(&log);
        channel.subscribe(move |n| second.borrow_mut().push(format!("second {n}")));

        channel.emit(&7);
        assert_eq!(*log.borrow(), vec!["first 7", "second 7"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut channel = Channel::<()>::new("ticks");

        let seen = Rc::clone(&count);
        let id = channel.subscribe(move |_| *seen.borrow_mut() += 1);
        channel.emit(&());
        assert!(channel.unsubscribe(id));
        channel.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(channel.listener_count(), 0);
        assert!(!channel.unsubscribe(id));
    }
}
