//! Search module.
//!
//! Contains client-side filter state and server-backed pagination.

mod filter;
mod pagination;

pub use filter::{apply_filters, FilterState, PriceRange, DEFAULT_PRICE_CEILING};
pub use pagination::Pagination;
