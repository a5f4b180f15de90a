//! Client-local key-value storage for the Lustre storefront.
//!
//! Storefront state that lives on the shopper's device (cart, wishlist) is
//! kept behind the [`KeyValueStore`] trait so it can be backed by memory in
//! tests, a JSON file in the CLI, or a browser store in an embedding.
//! Writers announce changes through a [`ChangeNotifier`] so other mounted
//! views can re-read.
//!
//! # Example
//!
//! ```rust
//! use lustre_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set_and_notify("wishlist", &vec!["ring-1"], "wishlistUpdated").unwrap();
//!
//! let ids: Option<Vec<String>> = cache.get("wishlist").unwrap();
//! assert_eq!(ids, Some(vec!["ring-1".to_string()]));
//! ```

mod error;
mod kv;
mod notify;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use notify::{ChangeNotifier, SubscriptionId};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, ChangeNotifier, FileStore, KeyValueStore, MemoryStore};
}
