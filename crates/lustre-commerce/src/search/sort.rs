//! Sort options for product listings.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Sort options offered by the listing dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Source collection order.
    #[default]
    Featured,
    /// Display price, ascending.
    PriceLowHigh,
    /// Display price, descending.
    PriceHighLow,
    /// New arrivals first.
    Newest,
    /// Most reviewed first.
    BestSelling,
}

impl SortOption {
    /// Every option, in dropdown order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceLowHigh,
        SortOption::PriceHighLow,
        SortOption::Newest,
        SortOption::BestSelling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLowHigh => "price-low-high",
            SortOption::PriceHighLow => "price-high-low",
            SortOption::Newest => "newest",
            SortOption::BestSelling => "best-selling",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
            SortOption::Newest => "Newest",
            SortOption::BestSelling => "Best Selling",
        }
    }

    /// Compare two products under this option. `Featured` treats all
    /// products as equal.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceLowHigh => a.display_price().cmp(&b.display_price()),
            SortOption::PriceHighLow => b.display_price().cmp(&a.display_price()),
            SortOption::Newest => b.is_new.cmp(&a.is_new),
            SortOption::BestSelling => b.review_count.cmp(&a.review_count),
        }
    }

    /// Stable-sort `items` in place. Equal keys keep their prior order.
    pub fn apply<P: Borrow<Product>>(&self, items: &mut [P]) {
        if *self == SortOption::Featured {
            return;
        }
        items.sort_by(|a, b| self.compare(a.borrow(), b.borrow()));
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::InvalidSortOption(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: u64, price: i64) -> Product {
        Product::new(id, format!("Item {id}"), Money::from_units(price, Currency::USD))
    }

    fn ids(items: &[Product]) -> Vec<&str> {
        items.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_price_low_high() {
        let mut items = vec![product(1, 300), product(2, 80), product(3, 600)];
        SortOption::PriceLowHigh.apply(&mut items);
        assert_eq!(ids(&items), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_price_high_low_is_stable() {
        let mut items = vec![product(1, 100), product(2, 300), product(3, 100)];
        SortOption::PriceHighLow.apply(&mut items);
        assert_eq!(ids(&items), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_newest_puts_new_first_keeping_order() {
        let mut items = vec![product(1, 10), product(2, 10), product(3, 10), product(4, 10)];
        items[1].is_new = true;
        items[3].is_new = true;
        SortOption::Newest.apply(&mut items);
        assert_eq!(ids(&items), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_best_selling() {
        let mut items = vec![product(1, 10), product(2, 10), product(3, 10)];
        items[0].review_count = 4;
        items[1].review_count = 40;
        items[2].review_count = 4;
        SortOption::BestSelling.apply(&mut items);
        assert_eq!(ids(&items), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_featured_is_noop() {
        let mut items = vec![product(3, 600), product(1, 300), product(2, 80)];
        SortOption::Featured.apply(&mut items);
        assert_eq!(ids(&items), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sorts_borrowed_products() {
        let owned = vec![product(1, 300), product(2, 80)];
        let mut refs: Vec<&Product> = owned.iter().collect();
        SortOption::PriceLowHigh.apply(&mut refs);
        assert_eq!(refs[0].id.as_str(), "2");
    }

    #[test]
    fn test_parse() {
        assert_eq!("price-low-high".parse::<SortOption>().unwrap(), SortOption::PriceLowHigh);
        assert_eq!("Best-Selling".parse::<SortOption>().unwrap(), SortOption::BestSelling);
        assert!("cheapest".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for option in SortOption::ALL {
            let json = serde_json::to_string(&option).unwrap();
            assert_eq!(json, format!("\"{}\"", option.as_str()));
        }
    }
}
