//! Storefront domain types and logic for Lustre.
//!
//! - **Catalog**: normalized products, images, variations and the data
//!   boundary that produces them
//! - **Search**: the filter, sort and paginate engine behind the shop page
//! - **Cart**: cart and wishlist stores over client-local storage
//! - **Orders**: order records read by the admin dashboard
//!
//! # Example
//!
//! ```rust
//! use lustre_commerce::prelude::*;
//!
//! let json = r#"[
//!     {"id": 1, "name": "Solitaire Ring", "price": 300},
//!     {"id": 2, "name": "Stud Earrings", "price": 80},
//!     {"id": 3, "name": "Tennis Bracelet", "price": 600}
//! ]"#;
//! let products = parse_catalog(json, Currency::USD).unwrap();
//!
//! let mut view = CatalogView::new(products);
//! view.set_sort(SortOption::PriceLowHigh);
//! let names: Vec<&str> = view.page_items().iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["Stud Earrings", "Solitaire Ring", "Tennis Bracelet"]);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        parse_catalog, Image, ImageRole, Product, ProductImages, Variation, VariationOption,
        Variations,
    };

    // Cart
    pub use crate::cart::{CartStore, LineItem, LineKey, WishlistStore, MAX_QUANTITY_PER_ITEM};

    // Orders
    pub use crate::orders::{parse_orders, Customer, Order, OrderItem, OrderStatus};

    // Search
    pub use crate::search::{
        apply_filters, paginate, reset_filters, CatalogFacets, CatalogView, Filter, FilterState,
        Pagination, PriceRange, SortOption,
    };
}
