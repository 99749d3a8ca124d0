//! Fixed category set for the storefront.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A product category, or the `All` sentinel used by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// Matches every product when used as a filter.
    #[default]
    #[serde(rename = "All")]
    All,
    #[serde(rename = "men's clothing")]
    MensClothing,
    #[serde(rename = "women's clothing")]
    WomensClothing,
    #[serde(rename = "electronics")]
    Electronics,
    #[serde(rename = "jewelery")]
    Jewelery,
}

impl Category {
    /// Every selectable value, in filter-dropdown order.
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::MensClothing,
        Category::WomensClothing,
        Category::Electronics,
        Category::Jewelery,
    ];

    /// Get the wire name (e.g., "men's clothing").
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::MensClothing => "men's clothing",
            Category::WomensClothing => "women's clothing",
            Category::Electronics => "electronics",
            Category::Jewelery => "jewelery",
        }
    }

    /// Display label with the first letter capitalised.
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Check if this is the `All` sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Category::All)
    }

    /// Whether a product in `product_category` passes when `self` is the
    /// selected filter value.
    pub fn admits(&self, product_category: Category) -> bool {
        self.is_all() || *self == product_category
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Category::All),
            "men's clothing" => Ok(Category::MensClothing),
            "women's clothing" => Ok(Category::WomensClothing),
            "electronics" => Ok(Category::Electronics),
            "jewelery" => Ok(Category::Jewelery),
            _ => Err(CommerceError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        assert_eq!("electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("Men's Clothing".parse::<Category>().unwrap(), Category::MensClothing);
        assert_eq!("All".parse::<Category>().unwrap(), Category::All);
        assert!("furniture".parse::<Category>().is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Category::WomensClothing.label(), "Women's clothing");
        assert_eq!(Category::All.label(), "All");
    }

    #[test]
    fn test_admits() {
        assert!(Category::All.admits(Category::Jewelery));
        assert!(Category::All.admits(Category::All));
        assert!(Category::Jewelery.admits(Category::Jewelery));
        assert!(!Category::Jewelery.admits(Category::Electronics));
        // Untagged products only show under "All".
        assert!(!Category::Electronics.admits(Category::All));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Category::MensClothing).unwrap();
        assert_eq!(json, r#""men's clothing""#);
    }
}
