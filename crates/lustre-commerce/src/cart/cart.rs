//! The persisted shopping cart.

use std::sync::Arc;

use lustre_cache::{Cache, KeyValueStore};

use crate::cart::line_item::load_items;
use crate::cart::{LineItem, LineKey};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Storage key of the cart array.
pub const CART_KEY: &str = "cart";

/// Event dispatched after every cart write.
pub const CART_UPDATED: &str = "cartUpdated";

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 99;

/// Cart operations over a shared [`Cache`].
///
/// Each operation reads the stored array, applies one change and writes it
/// back, then dispatches [`CART_UPDATED`].
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Arc<Cache<S>>,
    currency: Currency,
}

impl<S> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            currency: self.currency,
        }
    }
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(cache: Arc<Cache<S>>) -> Self {
        Self::with_currency(cache, Currency::default())
    }

    /// Cart whose subtotal is reported in `currency`.
    pub fn with_currency(cache: Arc<Cache<S>>, currency: Currency) -> Self {
        Self { cache, currency }
    }

    pub fn cache(&self) -> &Arc<Cache<S>> {
        &self.cache
    }

    pub fn items(&self) -> Result<Vec<LineItem>, CommerceError> {
        load_items(&self.cache, CART_KEY)
    }

    /// Add a line, merging into an existing line for the same product, size
    /// and colour. Returns the resulting quantity of that line.
    ///
    /// A merged quantity is capped at [`MAX_QUANTITY_PER_ITEM`].
    pub fn add_item(&self, item: LineItem) -> Result<u32, CommerceError> {
        if item.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        if item.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let mut items = self.items()?;
        let key = item.key();
        let quantity = match items.iter_mut().find(|i| i.same_line(&key)) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                existing.quantity
            }
            None => {
                let quantity = item.quantity;
                items.push(item);
                quantity
            }
        };

        self.save(&items)?;
        tracing::debug!(id = %key.id, quantity, "cart line added");
        Ok(quantity)
    }

    /// Set a line's quantity. Zero removes the line. Returns whether the
    /// line existed.
    pub fn update_quantity(&self, key: &LineKey, quantity: u32) -> Result<bool, CommerceError> {
        if quantity == 0 {
            return self.remove_item(key);
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let mut items = self.items()?;
        let Some(line) = items.iter_mut().find(|i| i.same_line(key)) else {
            return Ok(false);
        };
        line.quantity = quantity;
        self.save(&items)?;
        Ok(true)
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove_item(&self, key: &LineKey) -> Result<bool, CommerceError> {
        let mut items = self.items()?;
        let len_before = items.len();
        items.retain(|i| !i.same_line(key));
        if items.len() == len_before {
            return Ok(false);
        }
        self.save(&items)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), CommerceError> {
        self.save(&[])
    }

    /// Sum of quantities, the number on the cart badge.
    pub fn item_count(&self) -> Result<u32, CommerceError> {
        Ok(self
            .items()?
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity)))
    }

    pub fn is_empty(&self) -> Result<bool, CommerceError> {
        Ok(self.items()?.is_empty())
    }

    /// Sum of `price * quantity` over every line.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let cents = self.items()?.iter().try_fold(0i64, |acc, item| {
            item.total_cents().and_then(|t| acc.checked_add(t))
        });
        cents
            .map(|c| Money::new(c, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError> {
        self.cache.set_and_notify(CART_KEY, items, CART_UPDATED)?;
        Ok(())
    }
}
