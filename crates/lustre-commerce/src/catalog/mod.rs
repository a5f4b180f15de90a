//! Product catalog module.
//!
//! Contains the normalized product model and the boundary that produces it.

mod image;
mod normalize;
mod product;
mod variation;

pub use image::{Image, ImageRole, ProductImages};
pub use normalize::{
    normalize_product, normalize_products, parse_catalog, ProductsResponse, WireProduct,
};
pub use product::{slugify, Product};
pub use variation::{Variation, VariationOption, Variations, COLOR_LIKE_TITLES};
