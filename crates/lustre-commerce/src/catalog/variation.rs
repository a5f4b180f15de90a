//! Product variation axes (e.g., Metal, Size) and their options.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Title fragments that mark a variation axis as describing material.
pub const COLOR_LIKE_TITLES: &[&str] = &["color", "colour", "metal", "material"];

/// One selectable value on a variation axis, e.g. "Gold" under "Metal".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationOption {
    /// Option label.
    pub value: String,
    /// Additive price delta, if the option carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl VariationOption {
    /// A plain label with no price.
    pub fn label(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            price: None,
        }
    }

    /// A label carrying a price delta.
    pub fn priced(value: impl Into<String>, price: Money) -> Self {
        Self {
            value: value.into(),
            price: Some(price),
        }
    }
}

/// A variation axis with its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub title: String,
    pub options: Vec<VariationOption>,
}

impl Variation {
    pub fn new(title: impl Into<String>, options: Vec<VariationOption>) -> Self {
        Self {
            title: title.into(),
            options,
        }
    }

    /// Whether this axis describes material or colour.
    pub fn is_color_like(&self) -> bool {
        let title = self.title.to_lowercase();
        COLOR_LIKE_TITLES.iter().any(|t| title.contains(t))
    }

    /// Find an option by label, case-insensitively.
    pub fn option(&self, value: &str) -> Option<&VariationOption> {
        self.options
            .iter()
            .find(|o| o.value.eq_ignore_ascii_case(value))
    }
}

/// All variation axes of a product, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Variations(Vec<Variation>);

impl Variations {
    pub fn new(axes: Vec<Variation>) -> Self {
        Self(axes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variation> {
        self.0.iter()
    }

    /// Look up an axis by title, case-insensitively.
    pub fn get(&self, title: &str) -> Option<&Variation> {
        self.0.iter().find(|v| v.title.eq_ignore_ascii_case(title))
    }

    /// Smallest positive option price across every axis.
    pub fn min_option_price(&self) -> Option<Money> {
        self.0
            .iter()
            .flat_map(|v| v.options.iter())
            .filter_map(|o| o.price)
            .filter(Money::is_positive)
            .min()
    }

    /// First option value of the first colour-like axis.
    pub fn material(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.is_color_like())
            .and_then(|v| v.options.first())
            .map(|o| o.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(units: i64) -> Money {
        Money::from_units(units, Currency::USD)
    }

    #[test]
    fn test_min_option_price_ignores_unpriced_and_zero() {
        let variations = Variations::new(vec![
            Variation::new(
                "Metal",
                vec![
                    VariationOption::priced("Silver", usd(50)),
                    VariationOption::priced("Gold", usd(120)),
                ],
            ),
            Variation::new(
                "Size",
                vec![
                    VariationOption::label("6"),
                    VariationOption::priced("7", Money::zero(Currency::USD)),
                ],
            ),
        ]);
        assert_eq!(variations.min_option_price(), Some(usd(50)));
    }

    #[test]
    fn test_min_option_price_none_without_prices() {
        let variations = Variations::new(vec![Variation::new(
            "Size",
            vec![VariationOption::label("6"), VariationOption::label("7")],
        )]);
        assert_eq!(variations.min_option_price(), None);
    }

    #[test]
    fn test_material_uses_first_color_like_axis() {
        let variations = Variations::new(vec![
            Variation::new("Size", vec![VariationOption::label("7")]),
            Variation::new(
                "Metal Color",
                vec![
                    VariationOption::label("Rose Gold"),
                    VariationOption::label("Silver"),
                ],
            ),
            Variation::new("Material", vec![VariationOption::label("Platinum")]),
        ]);
        assert_eq!(variations.material(), Some("Rose Gold"));
    }

    #[test]
    fn test_material_absent() {
        let variations =
            Variations::new(vec![Variation::new("Size", vec![VariationOption::label("7")])]);
        assert_eq!(variations.material(), None);
        assert_eq!(Variations::default().material(), None);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let variations = Variations::new(vec![Variation::new(
            "Metal",
            vec![VariationOption::priced("Gold", usd(120))],
        )]);
        let metal = variations.get("metal").unwrap();
        assert_eq!(metal.option("GOLD").unwrap().price, Some(usd(120)));
    }
}
