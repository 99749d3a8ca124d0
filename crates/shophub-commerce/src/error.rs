//! Domain errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A category name outside the fixed storefront set.
    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    /// A price that is not a finite decimal number.
    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    /// A cart line priced in a different currency than the cart.
    #[error("cart is priced in {expected} but a line is in {got}")]
    CurrencyMismatch { expected: String, got: String },

    #[error("amount overflowed while computing cart totals")]
    Overflow,
}
