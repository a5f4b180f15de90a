//! Newtype IDs for type-safe identifiers.
//!
//! Storefront data arrives with ids that are sometimes JSON strings,
//! sometimes JSON numbers, and sometimes Mongo `{"$oid": ...}` records.
//! All of them normalize to the textual form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire forms an identifier may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl WireId {
    fn into_text(self) -> String {
        match self {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
            WireId::Oid { oid } => oid,
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                WireId::deserialize(deserializer).map(|raw| Self(raw.into_text()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

impl ProductId {
    /// Numeric reading of the id, if the text is a finite number.
    ///
    /// Catalog ids from the static data set are small integers; database ids
    /// are hex object ids and have no numeric reading.
    pub fn numeric_value(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
        assert_eq!(format!("{}", id), "prod-123");
    }

    #[test]
    fn test_id_from_number() {
        let id: ProductId = 42u64.into();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_deserialize_string_or_number() {
        let ids: Vec<ProductId> =
            serde_json::from_str(r#"["65a1f0c2e4b0", 7, {"$oid": "65a1f0c2e4b1"}]"#).unwrap();
        assert_eq!(ids[0].as_str(), "65a1f0c2e4b0");
        assert_eq!(ids[1].as_str(), "7");
        assert_eq!(ids[2].as_str(), "65a1f0c2e4b1");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&ProductId::from(7u64)).unwrap();
        assert_eq!(json, r#""7""#);
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(ProductId::new("4").numeric_value(), Some(4.0));
        assert_eq!(ProductId::new(" 12 ").numeric_value(), Some(12.0));
        assert_eq!(ProductId::new("65a1f0c2e4b0").numeric_value(), None);
        assert_eq!(ProductId::new("").numeric_value(), None);
        assert_eq!(ProductId::new("inf").numeric_value(), None);
    }
}
