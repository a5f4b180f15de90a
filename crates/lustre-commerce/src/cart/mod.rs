//! Shopping cart module.
//!
//! Contains the cart and wishlist stores and the line items they persist.

#[allow(clippy::module_inception)]
mod cart;
mod line_item;
mod wishlist;

pub use cart::{CartStore, CART_KEY, CART_UPDATED, MAX_QUANTITY_PER_ITEM};
pub use line_item::{LineItem, LineKey};
pub use wishlist::{WishlistStore, WISHLIST_KEY, WISHLIST_UPDATED};
