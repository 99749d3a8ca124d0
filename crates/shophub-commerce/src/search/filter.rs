//! Client-side product filtering.

use crate::catalog::{Category, Product};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Upper end of the price slider.
pub const DEFAULT_PRICE_CEILING: f64 = 1500.0;

/// Inclusive price bounds in major currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest admitted price.
    pub min: f64,
    /// Highest admitted price.
    pub max: f64,
}

impl PriceRange {
    /// Create a price range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The full slider span `[0, ceiling]`.
    pub fn up_to(ceiling: f64) -> Self {
        Self::new(0.0, ceiling)
    }

    /// Check if a price lies within the bounds.
    pub fn contains(&self, price: &Money) -> bool {
        let value = price.to_decimal();
        value >= self.min && value <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::up_to(DEFAULT_PRICE_CEILING)
    }
}

/// User-controlled predicates narrowing the product grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search over title and description.
    pub search: String,
    /// Selected category, `All` for no restriction.
    pub category: Category,
    /// Admitted price span.
    pub price: PriceRange,
    /// Minimum average rating.
    pub min_rating: f64,
    /// Current catalog page, 1-indexed.
    pub page: u32,
    default_price: PriceRange,
}

impl FilterState {
    /// Create the default filter state for a given price slider ceiling.
    pub fn with_price_ceiling(ceiling: f64) -> Self {
        let span = PriceRange::up_to(ceiling);
        Self {
            search: String::new(),
            category: Category::All,
            price: span,
            min_rating: 0.0,
            page: 1,
            default_price: span,
        }
    }

    /// Restore every predicate to its default and return to page 1.
    pub fn reset(&mut self) {
        *self = Self::with_price_ceiling(self.default_price.max);
    }

    /// Whether all predicates are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::with_price_ceiling(self.default_price.max)
    }

    /// Check a single product against all four predicates.
    pub fn admits(&self, product: &Product) -> bool {
        let needle = self.search.to_lowercase();
        self.admits_with_needle(product, &needle)
    }

    fn admits_with_needle(&self, product: &Product, needle_lower: &str) -> bool {
        product.matches_text(needle_lower)
            && self.category.admits(product.category)
            && self.price.contains(&product.price)
            && product.rating.rate >= self.min_rating
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_price_ceiling(DEFAULT_PRICE_CEILING)
    }
}

/// Products from the fetched page that pass every predicate, in page order.
pub fn apply_filters(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let needle = filters.search.to_lowercase();
    products
        .iter()
        .filter(|p| filters.admits_with_needle(p, &needle))
        .cloned()
        .collect()
}
