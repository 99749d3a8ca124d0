//! Product and rating types.

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Number of star slots rendered for a rating.
const STAR_SLOTS: u8 = 5;

/// Average review score and number of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score, 0 to 5.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

impl Rating {
    /// Create a new rating.
    pub fn new(rate: f64, count: u32) -> Self {
        Self { rate, count }
    }

    /// How the five star slots should be filled.
    pub fn star_fill(&self) -> StarFill {
        let rate = self.rate.clamp(0.0, STAR_SLOTS as f64);
        let full = rate.floor() as u8;
        StarFill {
            full,
            half: rate.fract() != 0.0 && full < STAR_SLOTS,
        }
    }
}

impl Default for Rating {
    /// The listing endpoint carries no review data, so cards show 4 stars from 10 reviews.
    fn default() -> Self {
        Self::new(4.0, 10)
    }
}

/// Star rendering for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarFill {
    /// Fully filled stars.
    pub full: u8,
    /// Whether the slot after the full stars is half filled.
    pub half: bool,
}

impl StarFill {
    /// Empty star slots remaining.
    pub fn empty(&self) -> u8 {
        STAR_SLOTS
            .saturating_sub(self.full)
            .saturating_sub(u8::from(self.half))
    }
}

/// A product as shown by the storefront.
///
/// Immutable once fetched; a re-fetch replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Current selling price.
    pub price: Money,
    /// Higher reference price shown struck through, if any.
    pub original_price: Option<Money>,
    /// Image URLs, primary first. May be empty.
    pub images: Vec<String>,
    /// Category, or `All` when the source carries none.
    pub category: Category,
    /// Review summary.
    pub rating: Rating,
}

impl Product {
    /// Create a product with no description, images, or discount.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            original_price: None,
            images: Vec::new(),
            category: Category::All,
            rating: Rating::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the struck-through reference price.
    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Append an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    /// First image, used on listing cards and in the cart.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Image at a gallery index.
    pub fn image(&self, index: usize) -> Option<&str> {
        self.images.get(index).map(String::as_str)
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .and_then(|original| original.checked_sub(&self.price))
    }

    /// Discount badge percentage, rounded to the nearest whole percent.
    pub fn discount_percent(&self) -> Option<i64> {
        let original = self.original_price?;
        if original.amount_cents == 0 {
            return None;
        }
        let saved = self.savings()?;
        Some((saved.amount_cents as f64 / original.amount_cents as f64 * 100.0).round() as i64)
    }

    /// Title cut to `max_chars` characters with a trailing ellipsis.
    pub fn short_title(&self, max_chars: usize) -> String {
        let head: String = self.title.chars().take(max_chars).collect();
        format!("{}...", head)
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}
