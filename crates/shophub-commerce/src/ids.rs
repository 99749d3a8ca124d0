//! Product identifiers.
//!
//! The backend issues numeric primary keys, but the storefront only ever
//! compares, formats and embeds them in paths, so they are carried as
//! strings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(pk: u64) -> Self {
        Self(pk.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Accepts `"id": 7` as well as `"id": "7"`.
impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Key(u64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Key(pk) => pk.into(),
            Wire::Text(text) => text.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        id: ProductId,
    }

    #[test]
    fn test_numeric_and_text_keys_match() {
        let numeric: Row = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        let textual: Row = serde_json::from_str(r#"{"id": "5"}"#).unwrap();
        assert_eq!(numeric.id, textual.id);
        assert_eq!(numeric.id, ProductId::from(5u64));
    }

    #[test]
    fn test_rejects_other_json() {
        assert!(serde_json::from_str::<Row>(r#"{"id": [5]}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id": null}"#).is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("prod-123")).unwrap();
        assert_eq!(json, r#""prod-123""#);
        assert_eq!(format!("/items/{}/", ProductId::from(9u64)), "/items/9/");
    }
}
