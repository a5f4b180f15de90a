//! Search module.
//!
//! Contains the listing engine with its filters, sort options, facets and
//! pagination.

mod engine;
mod facets;
mod filter;
mod results;
mod sort;

pub use engine::{apply_filters, reset_filters, CatalogView};
pub use facets::{CatalogFacets, Facet, FacetValue};
pub use filter::{Filter, FilterState, PriceRange, DEFAULT_MAX_PRICE};
pub use results::{paginate, total_pages, Pagination, ProductPage, DEFAULT_PAGE_SIZE};
pub use sort::SortOption;
