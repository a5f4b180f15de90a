//! Listing filters and the filter state they are derived from.

use std::collections::BTreeSet;

use crate::catalog::Product;
use crate::money::{Currency, Money};
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Upper bound of the default price range, in whole currency units.
pub const DEFAULT_MAX_PRICE: i64 = 5000;

/// A closed price interval. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Money,
    max: Money,
}

impl PriceRange {
    /// Create a range; reversed bounds are swapped.
    pub fn new(min: Money, max: Money) -> Self {
        if min.amount_cents <= max.amount_cents {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// `[0, max_units]` in the given currency.
    pub fn up_to(max_units: i64, currency: Currency) -> Self {
        Self::new(Money::zero(currency), Money::from_units(max_units, currency))
    }

    pub fn min(&self) -> Money {
        self.min
    }

    pub fn max(&self) -> Money {
        self.max
    }

    /// Inclusive containment on the amount.
    pub fn contains(&self, price: Money) -> bool {
        self.min.amount_cents <= price.amount_cents && price.amount_cents <= self.max.amount_cents
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::up_to(DEFAULT_MAX_PRICE, Currency::default())
    }
}

/// A single listing predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Display price within the range.
    Price(PriceRange),
    /// Material label contains any of the names, case-insensitively.
    Materials(Vec<String>),
    /// Placeholder style predicate keyed on id residue; see [`Filter::matches`].
    Styles(Vec<String>),
}

impl Filter {
    /// Check a product against this predicate.
    ///
    /// `Styles` does not look at styles at all: it drops products whose
    /// numeric id is divisible by `selected + 1`. Ids without a numeric
    /// reading always pass. This mirrors the live storefront and is kept
    /// until products carry style tags.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Price(range) => range.contains(product.display_price()),
            Filter::Materials(names) => {
                if names.is_empty() {
                    return true;
                }
                let Some(material) = product.material() else {
                    return false;
                };
                let material = material.to_lowercase();
                names
                    .iter()
                    .any(|name| material.contains(&name.to_lowercase()))
            }
            Filter::Styles(styles) => {
                if styles.is_empty() {
                    return true;
                }
                let modulus = (styles.len() + 1) as f64;
                match product.id.numeric_value() {
                    Some(id) => id % modulus != 0.0,
                    None => true,
                }
            }
        }
    }
}

/// The user-adjustable listing constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub price_range: PriceRange,
    pub selected_materials: BTreeSet<String>,
    pub selected_styles: BTreeSet<String>,
    pub sort_by: SortOption,
    /// 1-based page index.
    pub current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_price_range(PriceRange::default())
    }
}

impl FilterState {
    /// Default state with a custom initial price range.
    pub fn with_price_range(price_range: PriceRange) -> Self {
        Self {
            price_range,
            selected_materials: BTreeSet::new(),
            selected_styles: BTreeSet::new(),
            sort_by: SortOption::Featured,
            current_page: 1,
        }
    }

    /// The active predicates. Empty selections contribute no predicate.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = vec![Filter::Price(self.price_range)];
        if !self.selected_materials.is_empty() {
            filters.push(Filter::Materials(
                self.selected_materials.iter().cloned().collect(),
            ));
        }
        if !self.selected_styles.is_empty() {
            filters.push(Filter::Styles(self.selected_styles.iter().cloned().collect()));
        }
        filters
    }

    /// Conjunction of every active predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters().iter().all(|f| f.matches(product))
    }

    /// Whether any filter differs from `defaults`. Sort and page are ignored.
    pub fn is_filtered(&self, defaults: &FilterState) -> bool {
        self.price_range != defaults.price_range
            || !self.selected_materials.is_empty()
            || !self.selected_styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Variation, VariationOption, Variations};

    fn usd(units: i64) -> Money {
        Money::from_units(units, Currency::USD)
    }

    fn with_metal(id: u64, metal: &str) -> Product {
        let mut p = Product::new(id, "Ring", usd(100));
        p.variations = Variations::new(vec![Variation::new(
            "Metal",
            vec![VariationOption::label(metal)],
        )]);
        p
    }

    #[test]
    fn test_price_range_swaps_reversed_bounds() {
        let range = PriceRange::new(usd(500), usd(100));
        assert_eq!(range.min(), usd(100));
        assert_eq!(range.max(), usd(500));
    }

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange::new(usd(100), usd(500));
        assert!(range.contains(usd(100)));
        assert!(range.contains(usd(500)));
        assert!(!range.contains(Money::new(50_001, Currency::USD)));
        assert!(!range.contains(usd(99)));
    }

    #[test]
    fn test_default_state() {
        let state = FilterState::default();
        assert_eq!(state.price_range.min(), usd(0));
        assert_eq!(state.price_range.max(), usd(5000));
        assert_eq!(state.sort_by, SortOption::Featured);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.filters().len(), 1);
    }

    #[test]
    fn test_material_substring_case_insensitive() {
        let filter = Filter::Materials(vec!["gold".to_string()]);
        assert!(filter.matches(&with_metal(1, "18K Rose Gold")));
        assert!(!filter.matches(&with_metal(2, "Sterling Silver")));
    }

    #[test]
    fn test_material_any_of() {
        let filter = Filter::Materials(vec!["Platinum".to_string(), "Silver".to_string()]);
        assert!(filter.matches(&with_metal(1, "Sterling Silver")));
        assert!(!filter.matches(&with_metal(2, "Gold")));
    }

    #[test]
    fn test_material_filter_drops_products_without_material() {
        let filter = Filter::Materials(vec!["Gold".to_string()]);
        assert!(!filter.matches(&Product::new(1u64, "Plain", usd(10))));
    }

    #[test]
    fn test_style_residue() {
        let filter = Filter::Styles(vec!["Vintage".to_string()]);
        let kept: Vec<u64> = (1..=4)
            .filter(|id| filter.matches(&Product::new(*id, "P", usd(10))))
            .collect();
        assert_eq!(kept, vec![1, 3]);
    }

    #[test]
    fn test_style_residue_two_styles() {
        let filter = Filter::Styles(vec!["Modern".to_string(), "Vintage".to_string()]);
        let kept: Vec<u64> = (1..=6)
            .filter(|id| filter.matches(&Product::new(*id, "P", usd(10))))
            .collect();
        assert_eq!(kept, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_style_non_numeric_ids_pass() {
        let filter = Filter::Styles(vec!["Vintage".to_string()]);
        assert!(filter.matches(&Product::new("65a1f0c2", "P", usd(10))));
    }

    #[test]
    fn test_is_filtered() {
        let defaults = FilterState::default();
        let mut state = defaults.clone();
        state.sort_by = SortOption::Newest;
        assert!(!state.is_filtered(&defaults));

        state.selected_materials.insert("Gold".to_string());
        assert!(state.is_filtered(&defaults));
    }
}
