//! Catalog module.
//!
//! Contains types for products, categories, and ratings.

mod category;
mod product;

pub use category::Category;
pub use product::{Product, Rating, StarFill};
