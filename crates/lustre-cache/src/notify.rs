//! Named change notifications.
//!
//! Stands in for the browser's `dispatchEvent` / `addEventListener` pair.
//! Delivery is synchronous and scoped to one notifier instance; there is no
//! cross-instance propagation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Callback = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    event: String,
    callback: Callback,
}

/// Observer hub keyed by event name.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event`. The callback receives the event name.
    pub fn subscribe<F>(&self, event: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber {
                id,
                event: event.into(),
                callback: Arc::new(callback),
            });
        }
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                let before = subscribers.len();
                subscribers.retain(|s| s.id != id);
                subscribers.len() < before
            }
            Err(_) => false,
        }
    }

    /// Deliver `event` to every matching subscriber in subscription order.
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&self, event: &str) -> usize {
        // Callbacks run outside the lock so they may subscribe or unsubscribe.
        let callbacks: Vec<Callback> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers
                .iter()
                .filter(|s| s.event == event)
                .map(|s| Arc::clone(&s.callback))
                .collect(),
            Err(_) => return 0,
        };

        tracing::trace!(event, listeners = callbacks.len(), "dispatching change notification");
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Number of subscribers for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers
            .lock()
            .map(|s| s.iter().filter(|s| s.event == event).count())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.subscribers.lock().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &count)
            .finish()
    }
}
