//! The persisted wishlist.

use std::sync::Arc;

use lustre_cache::{Cache, KeyValueStore};

use crate::cart::line_item::load_items;
use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Storage key of the wishlist array.
pub const WISHLIST_KEY: &str = "wishlist";

/// Event dispatched after every wishlist write.
pub const WISHLIST_UPDATED: &str = "wishlistUpdated";

/// Wishlist operations over a shared [`Cache`]. Entries are unique by
/// product id.
#[derive(Debug)]
pub struct WishlistStore<S> {
    cache: Arc<Cache<S>>,
}

impl<S> Clone for WishlistStore<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: KeyValueStore> WishlistStore<S> {
    pub fn new(cache: Arc<Cache<S>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<Cache<S>> {
        &self.cache
    }

    pub fn items(&self) -> Result<Vec<LineItem>, CommerceError> {
        load_items(&self.cache, WISHLIST_KEY)
    }

    pub fn contains(&self, id: &ProductId) -> Result<bool, CommerceError> {
        Ok(self.items()?.iter().any(|i| &i.id == id))
    }

    /// Add an entry. Returns `false` if the product was already wishlisted.
    pub fn add(&self, item: LineItem) -> Result<bool, CommerceError> {
        let mut items = self.items()?;
        if items.iter().any(|i| i.id == item.id) {
            return Ok(false);
        }
        items.push(item);
        self.save(&items)?;
        Ok(true)
    }

    /// Remove a product. Returns whether it was wishlisted.
    pub fn remove(&self, id: &ProductId) -> Result<bool, CommerceError> {
        let mut items = self.items()?;
        let len_before = items.len();
        items.retain(|i| &i.id != id);
        if items.len() == len_before {
            return Ok(false);
        }
        self.save(&items)?;
        Ok(true)
    }

    /// Add the product if absent, remove it if present. Returns whether it
    /// is wishlisted afterwards.
    pub fn toggle(&self, item: LineItem) -> Result<bool, CommerceError> {
        let id = item.id.clone();
        let now_listed = if self.remove(&id)? {
            false
        } else {
            self.add(item)?
        };
        tracing::debug!(%id, now_listed, "wishlist toggled");
        Ok(now_listed)
    }

    pub fn clear(&self) -> Result<(), CommerceError> {
        self.save(&[])
    }

    pub fn len(&self) -> Result<usize, CommerceError> {
        Ok(self.items()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CommerceError> {
        Ok(self.items()?.is_empty())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError> {
        self.cache
            .set_and_notify(WISHLIST_KEY, items, WISHLIST_UPDATED)?;
        Ok(())
    }
}
