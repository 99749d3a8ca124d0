//! Shopping cart module.
//!
//! Contains the cart, its line items, and totals with tax.

mod cart;
mod pricing;

pub use cart::{step_quantity, Cart, CartLine};
pub use pricing::{CartTotals, TaxRate, DEFAULT_TAX_RATE};
