//! Commerce error types.
//!
//! The catalog filter engine itself never fails; these errors belong to the
//! data boundary and to the cart and wishlist stores.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Unknown sort key.
    #[error("Unknown sort option: {0}")]
    InvalidSortOption(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] lustre_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}
