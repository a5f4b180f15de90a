//! Product type.

use crate::catalog::{ProductImages, Variations};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A catalog product after boundary normalization.
///
/// Every optional wire field has been resolved to a concrete value, so the
/// filter engine can read fields without fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Base unit price. Zero when the price lives on the variations.
    pub price: Money,
    /// Previous price for strike-through display. Not required to exceed
    /// `price`.
    pub old_price: Option<Money>,
    /// Free-text category label.
    pub category: String,
    /// Normalized images.
    pub images: ProductImages,
    /// Variation axes in source order.
    pub variations: Variations,
    /// New-arrival flag.
    pub is_new: bool,
    /// Discount percentage, 0 for none.
    pub discount: u8,
    /// Star rating, 0 to 5.
    pub rating: u8,
    /// Number of reviews.
    pub review_count: u32,
}

impl Product {
    /// Create a product with the given price and empty optional fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            price,
            old_price: None,
            category: String::new(),
            images: ProductImages::default(),
            variations: Variations::default(),
            is_new: false,
            discount: 0,
            rating: 0,
            review_count: 0,
        }
    }

    /// The price shown, compared and sorted on.
    ///
    /// Equals `price`, unless `price` is zero and some variation option carries
    /// a positive price, in which case it is the cheapest such option.
    pub fn display_price(&self) -> Money {
        if self.price.is_zero() {
            if let Some(min) = self.variations.min_option_price() {
                return min;
            }
        }
        self.price
    }

    /// Price for a concrete set of `(axis title, option value)` selections.
    ///
    /// Option prices are added to the base price. When nothing selected
    /// carries a price this is the display price.
    pub fn price_for_selection(&self, selections: &[(&str, &str)]) -> Money {
        let deltas: Vec<Money> = selections
            .iter()
            .filter_map(|(title, value)| {
                self.variations
                    .get(title)
                    .and_then(|axis| axis.option(value))
                    .and_then(|o| o.price)
            })
            .collect();

        if deltas.is_empty() {
            return self.display_price();
        }
        deltas.into_iter().fold(self.price, |acc, d| acc + d)
    }

    /// Material label from the first colour-like variation, if any.
    pub fn material(&self) -> Option<&str> {
        self.variations.material()
    }

    /// Check if the product advertises a discount.
    pub fn has_discount(&self) -> bool {
        self.discount > 0
    }

    /// Amount saved against `old_price`, when it is above the display price.
    pub fn savings(&self) -> Option<Money> {
        let current = self.display_price();
        self.old_price
            .filter(|old| old.amount_cents > current.amount_cents)
            .map(|old| Money::new(old.amount_cents - current.amount_cents, current.currency))
    }

    /// URL of the card image, if any.
    pub fn front_image_url(&self) -> Option<&str> {
        self.images.front().map(|i| i.url.as_str())
    }
}

/// Lowercase, hyphen-separated slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
