//! Cart totals.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sales tax applied to the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    percent: f64,
}

/// Flat 8% sales tax.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate { percent: 8.0 };

impl TaxRate {
    /// Create a rate from a percentage (e.g., `8.0` for 8%).
    pub fn from_percent(percent: f64) -> Self {
        Self { percent }
    }

    /// The rate as a percentage.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Tax owed on an amount, rounded to the nearest cent.
    pub fn apply(&self, amount: &Money) -> Money {
        amount.percent_of(self.percent)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        DEFAULT_TAX_RATE
    }
}

/// Totals for the order summary panel.
///
/// Always derived from the current lines; never stored on the cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}
