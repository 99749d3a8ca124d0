//! Storefront domain types and logic for ShopHub.
//!
//! This crate holds the stateful core of the storefront, free of I/O:
//!
//! - **Catalog**: Products, categories, ratings
//! - **Cart**: Line items keyed by product, quantity stepping, totals with tax
//! - **Search**: Client-side filter state and server-backed pagination
//!
//! # Example
//!
//! ```rust
//! use shophub_commerce::prelude::*;
//!
//! let lamp = Product::new(
//!     ProductId::new("7"),
//!     "Minimalist Desk Lamp",
//!     Money::from_decimal(45.50, Currency::USD),
//! );
//!
//! let mut cart = Cart::new(Currency::USD);
//! cart.add_item(&lamp);
//! cart.add_item(&lamp);
//!
//! let totals = cart.totals().unwrap();
//! assert_eq!(totals.subtotal.to_string(), "$91.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

pub use catalog::{Category, Product, Rating, StarFill};
pub use cart::{step_quantity, Cart, CartLine, CartTotals, TaxRate, DEFAULT_TAX_RATE};
pub use search::{apply_filters, FilterState, Pagination, PriceRange, DEFAULT_PRICE_CEILING};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, Rating, StarFill};

    // Cart
    pub use crate::cart::{step_quantity, Cart, CartLine, CartTotals, TaxRate, DEFAULT_TAX_RATE};

    // Search
    pub use crate::search::{apply_filters, FilterState, Pagination, PriceRange};
}
