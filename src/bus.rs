//! In-process event bus plugins attach their listeners to.
//!
//! Delivery is synchronous and fire-and-forget: `publish` invokes every
//! listener inline, in subscription order, and publishing with zero listeners
//! is not an error. There is no per-listener isolation.

use std::sync::{Arc, Mutex};

use crate::domain::events::Event;

type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

pub struct EventBus {
    listeners: Mutex<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Attach a listener. Listeners fire in the order they were attached.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.push(Arc::new(listener));
    }

    /// Publish an event to every listener, in subscription order.
    pub fn publish(&self, event: &Event) {
        // Clone the listener list outside the lock so a listener that
        // subscribes re-entrantly does not deadlock.
        let listeners = {
            let guard = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            guard.clone()
        };
        for listener in listeners {
            listener(event);
        }
    }

    /// Drop every listener attached at position `len` or later.
    ///
    /// Used when plugins are reloaded: the previous generation's listeners
    /// form a suffix of the list, and they must go before the libraries that
    /// own their closures are unloaded.
    pub fn truncate(&self, len: usize) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .truncate(len);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
