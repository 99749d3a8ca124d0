//! Cart and line item types.

use crate::cart::{CartTotals, TaxRate};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A session shopping cart.
///
/// Holds at most one line per product. Lines keep insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: Currency,
    tax_rate: TaxRate,
}

impl Cart {
    /// Create an empty cart with the default tax rate.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            tax_rate: TaxRate::default(),
        }
    }

    /// Override the tax rate.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        self.add_units(product, 1);
    }

    /// Add `units` of a product. Adding zero units is a no-op.
    pub fn add_units(&mut self, product: &Product, units: u32) {
        if units == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(units);
            return;
        }
        let mut line = CartLine::from_product(product);
        line.quantity = units;
        self.lines.push(line);
    }

    /// Step a line's quantity by `delta`, never going below 1.
    ///
    /// Returns `false` if no line exists for the product.
    pub fn update_quantity(&mut self, product_id: &ProductId, delta: i64) -> bool {
        match self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            Some(line) => {
                line.quantity = step_quantity(line.quantity, delta);
                true
            }
            None => false,
        }
    }

    /// Remove the line for a product.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute subtotal, tax, and total from the current lines.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        let mut line_totals = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.unit_price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: line.unit_price.currency.code().to_string(),
                });
            }
            line_totals.push(line.line_total()?);
        }

        let subtotal =
            Money::checked_sum(&line_totals, self.currency).ok_or(CommerceError::Overflow)?;
        let tax = self.tax_rate.apply(&subtotal);
        let total = subtotal.checked_add(&tax).ok_or(CommerceError::Overflow)?;

        Ok(CartTotals {
            subtotal,
            tax,
            total,
        })
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get_line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Tax rate in effect.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

/// A product entry in the cart.
///
/// Title, price, and image are snapshotted when the line is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product title at time of add.
    pub title: String,
    /// Unit price at time of add.
    pub unit_price: Money,
    /// Primary image at time of add.
    pub image: Option<String>,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            image: product.primary_image().map(str::to_string),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .checked_times(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// Apply a signed step to a quantity, clamping into `[1, u32::MAX]`.
pub fn step_quantity(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta);
    next.clamp(1, i64::from(u32::MAX)) as u32
}
