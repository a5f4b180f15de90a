//! Typed key-value wrapper with automatic JSON serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{CacheError, ChangeNotifier, KeyValueStore, SubscriptionId};

/// Type-safe cache over any [`KeyValueStore`].
///
/// Values are stored as JSON text, the way the browser keeps arrays in
/// local storage.
pub struct Cache<S> {
    store: S,
    notifier: Arc<ChangeNotifier>,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store with a fresh notifier.
    pub fn new(store: S) -> Self {
        Self::with_notifier(store, Arc::new(ChangeNotifier::new()))
    }

    /// Wrap a store, sharing an existing notifier.
    pub fn with_notifier(store: S, notifier: Arc<ChangeNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Set a value, then dispatch `event` to subscribers.
    pub fn set_and_notify<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        event: &str,
    ) -> Result<(), CacheError> {
        self.set(key, value)?;
        self.notifier.notify(event);
        Ok(())
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key)?.is_some())
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Subscribe to a named change event.
    pub fn subscribe<F>(&self, event: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.notifier.subscribe(event, callback)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Shared notifier handle.
    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> std::fmt::Debug for Cache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
