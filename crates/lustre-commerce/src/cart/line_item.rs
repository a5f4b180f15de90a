//! Stored cart and wishlist entries.

use lustre_cache::{Cache, CacheError, KeyValueStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{self, Money};

/// An entry of the stored `cart` or `wishlist` array.
///
/// The shape matches what the storefront writes to local storage:
/// `{ id, name, price, image, quantity, selectedSize?, selectedColor? }`
/// with `price` as a plain decimal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            quantity,
            selected_size: None,
            selected_color: None,
        }
    }

    /// Entry for `product` with the given selections.
    ///
    /// The unit price is the product price for the selected size (on the
    /// `Size` axis) and colour (on the first colour-like axis).
    pub fn from_product(
        product: &Product,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Self {
        let color_axis = product
            .variations
            .iter()
            .find(|v| v.is_color_like())
            .map(|v| v.title.as_str());

        let mut selections = Vec::new();
        if let Some(size) = size {
            selections.push(("Size", size));
        }
        if let (Some(axis), Some(color)) = (color_axis, color) {
            selections.push((axis, color));
        }

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price_for_selection(&selections),
            image: product.front_image_url().unwrap_or_default().to_string(),
            quantity,
            selected_size: size.map(str::to_string),
            selected_color: color.map(str::to_string),
        }
    }

    pub fn with_selection(mut self, size: Option<&str>, color: Option<&str>) -> Self {
        self.selected_size = size.map(str::to_string);
        self.selected_color = color.map(str::to_string);
        self
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id.clone(),
            selected_size: self.selected_size.clone(),
            selected_color: self.selected_color.clone(),
        }
    }

    /// Same product with the same size and colour.
    pub fn same_line(&self, key: &LineKey) -> bool {
        self.id == key.id
            && self.selected_size == key.selected_size
            && self.selected_color == key.selected_color
    }

    /// `price * quantity` in cents, `None` on overflow.
    pub fn total_cents(&self) -> Option<i64> {
        self.price.amount_cents.checked_mul(i64::from(self.quantity))
    }
}

/// Identity of a cart line: product, size and colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub id: ProductId,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

impl LineKey {
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            selected_size: None,
            selected_color: None,
        }
    }

    pub fn with_selection(mut self, size: Option<&str>, color: Option<&str>) -> Self {
        self.selected_size = size.map(str::to_string);
        self.selected_color = color.map(str::to_string);
        self
    }
}

/// Read the array stored under `key`.
///
/// A missing key is empty. So is stored text that is not a JSON array, which
/// is logged and left in place until the next write replaces it. Entries that
/// do not parse as a [`LineItem`] are logged and skipped; the rest are kept.
pub(crate) fn load_items<S: KeyValueStore>(
    cache: &Cache<S>,
    key: &str,
) -> Result<Vec<LineItem>, CommerceError> {
    let entries = match cache.get::<Vec<Value>>(key) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(CacheError::SerializeError(e)) => {
            tracing::warn!(key, error = %e, "stored array unreadable; treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let items = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<LineItem>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "skipping unreadable stored entry");
                None
            }
        })
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Variation, VariationOption, Variations};
    use crate::money::Currency;

    #[test]
    fn test_wire_shape() {
        let item = LineItem::new(1u64, "Band", Money::new(4550, Currency::USD), 2)
            .with_selection(Some("7"), None);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Band",
                "price": 45.5,
                "image": "",
                "quantity": 2,
                "selectedSize": "7"
            })
        );
    }

    #[test]
    fn test_reads_browser_records() {
        let json = r#"[{"id": 12, "name": "Hoops", "price": 80, "image": "h.jpg"}]"#;
        let items: Vec<LineItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].id.as_str(), "12");
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].price.amount_cents, 8000);
        assert!(items[0].selected_color.is_none());
    }

    #[test]
    fn test_from_product_uses_selection_price() {
        let mut product = Product::new(5u64, "Signet", Money::zero(Currency::USD));
        product.variations = Variations::new(vec![
            Variation::new("Size", vec![VariationOption::label("7")]),
            Variation::new(
                "Metal",
                vec![
                    VariationOption::priced("Silver", Money::from_units(50, Currency::USD)),
                    VariationOption::priced("Gold", Money::from_units(120, Currency::USD)),
                ],
            ),
        ]);

        let item = LineItem::from_product(&product, 1, Some("7"), Some("Gold"));
        assert_eq!(item.price, Money::from_units(120, Currency::USD));
        assert_eq!(item.selected_color.as_deref(), Some("Gold"));

        let plain = LineItem::from_product(&product, 1, None, None);
        assert_eq!(plain.price, Money::from_units(50, Currency::USD));
    }

    #[test]
    fn test_same_line() {
        let item = LineItem::new("r1", "Ring", Money::zero(Currency::USD), 1)
            .with_selection(Some("6"), Some("Gold"));
        assert!(item.same_line(&item.key()));
        assert!(!item.same_line(&LineKey::new("r1")));
        assert!(!item.same_line(&LineKey::new("r1").with_selection(Some("7"), Some("Gold"))));
    }
}
