//! Normalization from wire product records to [`Product`].
//!
//! Products reach the storefront from two sources: the `/api/products`
//! endpoint (`{ success, products }`) and statically bundled arrays. Both
//! carry loosely typed fields; this module resolves them once so downstream
//! code sees a fully populated shape.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::{slugify, Image, ImageRole, Product, ProductImages, Variation, VariationOption, Variations};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A product as it appears on the wire.
///
/// Every field is optional. Fields that may arrive in more than one shape are
/// kept as raw JSON and interpreted during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub old_price: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub images: Value,
    #[serde(default)]
    pub variations: Value,
    #[serde(default)]
    pub is_new: Value,
    #[serde(default)]
    pub discount: Value,
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub review_count: Value,
}

impl WireProduct {
    /// Read one raw record.
    ///
    /// `id` wins over `_id` and `name` over `title` when a record carries
    /// both.
    pub fn from_record(record: Value) -> Result<Self, CommerceError> {
        let Value::Object(mut map) = record else {
            return Err(CommerceError::Validation(
                "product record is not an object".to_string(),
            ));
        };
        prefer_field(&mut map, "id", "_id");
        prefer_field(&mut map, "name", "title");
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

/// Keep `primary`, falling back to `fallback` when `primary` is absent or
/// null. `fallback` is always removed.
fn prefer_field(map: &mut Map<String, Value>, primary: &str, fallback: &str) {
    let Some(value) = map.remove(fallback) else {
        return;
    };
    if map.get(primary).map_or(true, Value::is_null) {
        map.insert(primary.to_string(), value);
    }
}

/// Response envelope of the product listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub products: Vec<Value>,
}

fn default_success() -> bool {
    true
}

impl ProductsResponse {
    /// Normalize the listed products. An unsuccessful response is an empty
    /// catalog.
    pub fn into_products(self, currency: Currency) -> Vec<Product> {
        if !self.success {
            tracing::warn!("product listing reported failure; showing empty catalog");
            return Vec::new();
        }
        normalize_products(self.products, currency)
    }
}

/// Parse catalog JSON, either an endpoint envelope or a bare array.
///
/// Only text that is not JSON, or JSON that is neither an object nor an
/// array, is an error. Records that cannot be read are skipped.
pub fn parse_catalog(json: &str, currency: Currency) -> Result<Vec<Product>, CommerceError> {
    let products = match serde_json::from_str::<Value>(json)? {
        Value::Array(records) => normalize_products(records, currency),
        envelope @ Value::Object(_) => {
            let response: ProductsResponse = serde_json::from_value(envelope)?;
            response.into_products(currency)
        }
        _ => {
            return Err(CommerceError::Validation(
                "catalog must be a product array or a { success, products } envelope".to_string(),
            ))
        }
    };
    tracing::debug!(count = products.len(), "catalog loaded");
    Ok(products)
}

/// Normalize raw product records, preserving order.
///
/// Unreadable records are logged and skipped. Positional ids count every
/// record, skipped or not.
pub fn normalize_products(records: Vec<Value>, currency: Currency) -> Vec<Product> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match WireProduct::from_record(record) {
            Ok(wire) => Some(normalize_product(wire, index, currency)),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable product record");
                None
            }
        })
        .collect()
}

/// Normalize one wire product. `index` names products that arrive without
/// an id.
pub fn normalize_product(wire: WireProduct, index: usize, currency: Currency) -> Product {
    let id = wire
        .id
        .filter(|id| !id.as_str().trim().is_empty())
        .unwrap_or_else(|| ProductId::new(format!("product-{}", index + 1)));
    let name = wire.name.unwrap_or_default();
    let slug = wire
        .slug
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(&name));

    Product {
        price: money(&wire.price, currency)
            .unwrap_or_else(|| Money::zero(currency))
            .non_negative(),
        old_price: money(&wire.old_price, currency),
        category: category_label(&wire.category),
        images: images(&wire.images),
        variations: variations(&wire.variations, currency),
        is_new: flag(&wire.is_new),
        discount: bounded(&wire.discount, 100),
        rating: bounded(&wire.rating, 5),
        review_count: number(&wire.review_count)
            .map(|n| n.max(0.0).min(u32::MAX as f64) as u32)
            .unwrap_or(0),
        id,
        name,
        slug,
    }
}

/// Numbers and numeric strings.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn money(value: &Value, currency: Currency) -> Option<Money> {
    number(value).map(|n| Money::from_decimal(n, currency))
}

fn bounded(value: &Value, max: u8) -> u8 {
    number(value)
        .map(|n| n.round().clamp(0.0, max as f64) as u8)
        .unwrap_or(0)
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Category as a label, or a populated `{ name }` reference.
fn category_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

/// Images as positional strings or `{ url, type }` records.
fn images(value: &Value) -> ProductImages {
    let entries: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::String(_) | Value::Object(_) => vec![value],
        _ => Vec::new(),
    };

    let images = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(url) => Some(Image::new(url.trim(), ImageRole::Unspecified)),
            Value::Object(map) => {
                let url = map.get("url").and_then(Value::as_str)?;
                let role = map
                    .get("type")
                    .or_else(|| map.get("role"))
                    .and_then(Value::as_str)
                    .map(ImageRole::parse)
                    .unwrap_or_default();
                Some(Image::new(url.trim(), role))
            }
            _ => None,
        })
        .filter(|image| !image.url.is_empty())
        .collect();

    ProductImages::new(images)
}

/// Variations as `{ title: [option, ...] }`, options being labels or
/// `{ value, price }` pairs.
fn variations(value: &Value, currency: Currency) -> Variations {
    let Value::Object(axes) = value else {
        return Variations::default();
    };

    let axes = axes
        .iter()
        .filter_map(|(title, options)| {
            let options: Vec<VariationOption> = options
                .as_array()?
                .iter()
                .filter_map(|option| variation_option(option, currency))
                .collect();
            Some(Variation::new(title.clone(), options))
        })
        .collect();

    Variations::new(axes)
}

fn variation_option(value: &Value, currency: Currency) -> Option<VariationOption> {
    match value {
        Value::String(label) => Some(VariationOption::label(label.trim())),
        Value::Number(n) => Some(VariationOption::label(n.to_string())),
        Value::Object(map) => {
            let label = match map.get("value")? {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            let price = map.get("price").and_then(|p| money(p, currency));
            Some(VariationOption {
                value: label,
                price,
            })
        }
        _ => None,
    }
}
