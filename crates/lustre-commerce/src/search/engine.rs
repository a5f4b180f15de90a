//! The listing engine: filter, sort and paginate over the full catalog.
//!
//! [`apply_filters`] and [`reset_filters`] are pure functions over a product
//! slice. [`CatalogView`] holds one browsing session and applies each user
//! interaction as a single state transition.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::money::Money;
use crate::search::{
    paginate, CatalogFacets, FilterState, Pagination, PriceRange, ProductPage, SortOption,
    DEFAULT_PAGE_SIZE,
};

/// Products of `all` matching every active filter in `state`, ordered by
/// `state.sort_by`. Equal sort keys keep catalog order.
pub fn apply_filters<'a>(all: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    let filters = state.filters();
    let mut matched: Vec<&Product> = all
        .iter()
        .filter(|p| filters.iter().all(|f| f.matches(p)))
        .collect();
    state.sort_by.apply(&mut matched);
    matched
}

/// The default state and the full catalog in catalog order.
pub fn reset_filters(all: &[Product]) -> (FilterState, Vec<&Product>) {
    (FilterState::default(), all.iter().collect())
}

/// A browsing session over an owned catalog.
///
/// The visible set is kept as indices into the catalog, so resetting and
/// returning to `Featured` restore catalog order exactly.
#[derive(Debug, Clone)]
pub struct CatalogView {
    all: Vec<Product>,
    defaults: FilterState,
    state: FilterState,
    visible: Vec<usize>,
    page_size: usize,
}

impl CatalogView {
    /// Session with the default state and page size.
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_defaults(products, FilterState::default(), DEFAULT_PAGE_SIZE)
    }

    /// Session whose initial state (and reset target) is `defaults`.
    pub fn with_defaults(products: Vec<Product>, defaults: FilterState, page_size: usize) -> Self {
        let mut view = Self {
            all: products,
            state: defaults.clone(),
            defaults,
            visible: Vec::new(),
            page_size,
        };
        view.rederive();
        view
    }

    pub fn products(&self) -> &[Product] {
        &self.all
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filtered and sorted products, all pages.
    pub fn visible(&self) -> Vec<&Product> {
        self.visible.iter().map(|&i| &self.all[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Products on the current page.
    pub fn page_items(&self) -> Vec<&Product> {
        paginate(&self.visible, self.state.current_page, self.page_size)
            .iter()
            .map(|&i| &self.all[i])
            .collect()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.state.current_page, self.page_size, self.visible.len())
    }

    /// The current page with its pager info.
    pub fn page(&self) -> ProductPage<&Product> {
        ProductPage {
            items: self.page_items(),
            pagination: self.pagination(),
        }
    }

    pub fn facets(&self) -> CatalogFacets {
        CatalogFacets::from_products(&self.all, &self.state)
    }

    pub fn set_price_range(&mut self, min: Money, max: Money) {
        self.state.price_range = PriceRange::new(min, max);
        self.rederive();
    }

    /// Select or deselect a material. Returns whether it is now selected.
    pub fn toggle_material(&mut self, material: &str) -> bool {
        let selected = toggle(&mut self.state.selected_materials, material);
        self.rederive();
        selected
    }

    /// Select or deselect a style. Returns whether it is now selected.
    pub fn toggle_style(&mut self, style: &str) -> bool {
        let selected = toggle(&mut self.state.selected_styles, style);
        self.rederive();
        selected
    }

    pub fn clear_materials(&mut self) {
        self.state.selected_materials.clear();
        self.rederive();
    }

    pub fn clear_styles(&mut self) {
        self.state.selected_styles.clear();
        self.rederive();
    }

    /// Change the sort order. The visible set is re-sorted in place.
    pub fn set_sort(&mut self, sort_by: SortOption) {
        self.state.sort_by = sort_by;
        self.state.current_page = 1;
        let all = &self.all;
        self.visible
            .sort_by(|&a, &b| compare_indexed(sort_by, all, a, b));
        tracing::debug!(sort = %sort_by, "listing re-sorted");
    }

    /// Jump to a page. Out-of-range pages are kept and show nothing.
    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page;
    }

    /// Back to the initial state with the full catalog visible.
    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
        self.rederive();
    }

    /// Whether any filter is active relative to the initial state.
    pub fn is_filtered(&self) -> bool {
        self.state.is_filtered(&self.defaults)
    }

    fn rederive(&mut self) {
        let filters = self.state.filters();
        let sort_by = self.state.sort_by;
        let all = &self.all;

        let mut visible: Vec<usize> = (0..all.len())
            .filter(|&i| filters.iter().all(|f| f.matches(&all[i])))
            .collect();
        visible.sort_by(|&a, &b| compare_indexed(sort_by, all, a, b));

        self.visible = visible;
        self.state.current_page = 1;
        tracing::debug!(
            visible = self.visible.len(),
            total = self.all.len(),
            "listing re-derived"
        );
    }
}

fn compare_indexed(sort_by: SortOption, all: &[Product], a: usize, b: usize) -> Ordering {
    sort_by.compare(&all[a], &all[b]).then(a.cmp(&b))
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Variation, VariationOption, Variations};
    use crate::money::Currency;

    fn usd(units: i64) -> Money {
        Money::from_units(units, Currency::USD)
    }

    fn product(id: u64, price: i64) -> Product {
        Product::new(id, format!("Item {id}"), usd(price))
    }

    fn sample() -> Vec<Product> {
        vec![product(1, 50), product(2, 300), product(3, 900)]
    }

    fn ids(items: &[&Product]) -> Vec<String> {
        items.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_price_filter() {
        let all = sample();
        let mut state = FilterState::default();
        state.price_range = PriceRange::new(usd(100), usd(500));
        assert_eq!(ids(&apply_filters(&all, &state)), vec!["2"]);
    }

    #[test]
    fn test_low_high_sort() {
        let all = vec![product(1, 300), product(2, 80), product(3, 600)];
        let mut state = FilterState::default();
        state.sort_by = SortOption::PriceLowHigh;
        assert_eq!(ids(&apply_filters(&all, &state)), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_style_stub_filter() {
        let all: Vec<Product> = (1..=4).map(|id| product(id, 10)).collect();
        let mut state = FilterState::default();
        state.selected_styles.insert("Vintage".to_string());
        assert_eq!(ids(&apply_filters(&all, &state)), vec!["1", "3"]);
    }

    #[test]
    fn test_material_filter_on_derived_price() {
        let mut ring = Product::new(7u64, "Band", Money::zero(Currency::USD));
        ring.variations = Variations::new(vec![Variation::new(
            "Metal",
            vec![VariationOption::priced("Rose Gold", usd(50))],
        )]);
        let all = vec![ring, product(8, 20)];
        let mut state = FilterState::default();
        state.selected_materials.insert("gold".to_string());
        state.price_range = PriceRange::new(usd(40), usd(60));
        assert_eq!(ids(&apply_filters(&all, &state)), vec!["7"]);
    }

    #[test]
    fn test_reset_filters() {
        let all = sample();
        let (state, products) = reset_filters(&all);
        assert_eq!(state, FilterState::default());
        assert_eq!(ids(&products), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_view_pagination() {
        let all: Vec<Product> = (1..=25).map(|id| product(id, 10)).collect();
        let mut view = CatalogView::new(all);
        assert_eq!(view.pagination().total_pages, 3);
        view.set_page(3);
        assert_eq!(ids(&view.page_items()), vec!["25"]);
        view.set_page(4);
        let page = view.page();
        assert!(page.is_empty());
        assert_eq!(page.pagination.total, 25);
    }

    #[test]
    fn test_view_changes_reset_page() {
        let all: Vec<Product> = (1..=25).map(|id| product(id, 10)).collect();
        let mut view = CatalogView::new(all);

        view.set_page(2);
        view.set_sort(SortOption::PriceHighLow);
        assert_eq!(view.state().current_page, 1);

        view.set_page(3);
        view.toggle_style("Modern");
        assert_eq!(view.state().current_page, 1);
    }

    #[test]
    fn test_view_resort_matches_rederive() {
        let mut all = vec![product(1, 300), product(2, 80), product(3, 300), product(4, 80)];
        all[2].review_count = 9;
        let mut view = CatalogView::new(all.clone());

        for sort in [SortOption::PriceLowHigh, SortOption::BestSelling, SortOption::PriceHighLow] {
            view.set_sort(sort);
            let mut state = FilterState::default();
            state.sort_by = sort;
            assert_eq!(ids(&view.visible()), ids(&apply_filters(&all, &state)));
        }

        view.set_sort(SortOption::Featured);
        assert_eq!(ids(&view.visible()), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_view_toggle_and_reset() {
        let mut view = CatalogView::new((1..=4).map(|id| product(id, 10)).collect());
        assert!(view.toggle_style("Vintage"));
        assert_eq!(view.visible_len(), 2);
        assert!(view.is_filtered());

        assert!(!view.toggle_style("Vintage"));
        assert_eq!(view.visible_len(), 4);

        view.toggle_material("Gold");
        view.set_sort(SortOption::Newest);
        view.reset();
        assert_eq!(view.state(), &FilterState::default());
        assert_eq!(ids(&view.visible()), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_view_price_range_swaps() {
        let mut view = CatalogView::new(sample());
        view.set_price_range(usd(500), usd(100));
        assert_eq!(ids(&view.visible()), vec!["2"]);
        assert_eq!(view.state().price_range.min(), usd(100));
    }

    #[test]
    fn test_view_custom_defaults() {
        let defaults = FilterState::with_price_range(PriceRange::up_to(100, Currency::USD));
        let mut view = CatalogView::with_defaults(sample(), defaults, 1);
        assert_eq!(view.visible_len(), 1);
        assert_eq!(view.pagination().total_pages, 1);

        view.set_price_range(usd(0), usd(1000));
        view.reset();
        assert_eq!(view.visible_len(), 1);
    }
}
