//! Filter sidebar facets derived from the catalog.

use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::money::Money;
use crate::search::FilterState;
use serde::{Deserialize, Serialize};

/// A group of selectable values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Material").
    pub name: String,
    /// Product field this facet reads.
    pub field: String,
    pub values: Vec<FacetValue>,
}

impl Facet {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Build a facet from label counts, most common first, ties by label.
    fn from_counts(
        name: &str,
        field: &str,
        counts: BTreeMap<String, usize>,
        is_selected: impl Fn(&str) -> bool,
    ) -> Self {
        let mut facet = Self::new(name, field);
        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        for (value, count) in entries {
            let selected = is_selected(&value);
            facet.add_value(value, count, selected);
        }
        facet
    }

    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    pub fn get(&self, value: &str) -> Option<&FacetValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    pub value: String,
    /// Number of products with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// Everything the filter sidebar shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFacets {
    pub materials: Facet,
    pub categories: Facet,
    /// Lowest display price. `None` for an empty catalog.
    pub min_price: Option<Money>,
    /// Highest display price. `None` for an empty catalog.
    pub max_price: Option<Money>,
}

impl CatalogFacets {
    /// Count materials and categories over `products`, marking materials
    /// selected in `state`.
    pub fn from_products(products: &[Product], state: &FilterState) -> Self {
        let mut materials: BTreeMap<String, usize> = BTreeMap::new();
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();

        for product in products {
            if let Some(material) = product.material() {
                *materials.entry(material.to_string()).or_default() += 1;
            }
            if !product.category.is_empty() {
                *categories.entry(product.category.clone()).or_default() += 1;
            }
        }

        let selected = |label: &str| {
            state
                .selected_materials
                .iter()
                .any(|m| m.eq_ignore_ascii_case(label))
        };

        let prices = products.iter().map(Product::display_price);

        Self {
            materials: Facet::from_counts("Material", "material", materials, selected),
            categories: Facet::from_counts("Category", "category", categories, |_| false),
            min_price: prices.clone().min_by_key(|p| p.amount_cents),
            max_price: prices.max_by_key(|p| p.amount_cents),
        }
    }
}
