//! Prices in integer minor units.
//!
//! The backend sends decimal prices; they are converted once, at the edge,
//! and all cart arithmetic after that is exact and overflow-checked.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minor units per major unit. Every supported currency has two decimals.
const MINOR_PER_MAJOR: i64 = 100;

/// Currencies the storefront can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    INR,
    EUR,
    GBP,
}

impl Currency {
    /// ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::INR => "INR",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Prefix shown before an amount. The listing prints rupees as "Rs.".
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::INR => "Rs.",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in minor units (cents, paise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert a decimal amount, rounding to the nearest minor unit.
    ///
    /// ```
    /// use shophub_commerce::{Currency, Money};
    /// assert_eq!(Money::from_decimal(49.99, Currency::USD).amount_cents, 4999);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::USD).amount_cents, 30);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * MINOR_PER_MAJOR as f64).round() as i64, currency)
    }

    /// Parse a wire price such as `"129.50"` or `"8"`.
    pub fn parse_decimal(text: &str, currency: Currency) -> Result<Self, CommerceError> {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(Self::from_decimal(amount, currency)),
            _ => Err(CommerceError::InvalidPrice(trimmed.to_string())),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Value in major units, for comparison against slider bounds.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / MINOR_PER_MAJOR as f64
    }

    /// `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        self.same_currency(other)?;
        let cents = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(cents, self.currency))
    }

    /// `None` on currency mismatch or overflow.
    pub fn checked_sub(&self, other: &Money) -> Option<Money> {
        self.same_currency(other)?;
        let cents = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(cents, self.currency))
    }

    /// Unit price times a quantity; `None` on overflow.
    pub fn checked_times(&self, quantity: u32) -> Option<Money> {
        let cents = self.amount_cents.checked_mul(i64::from(quantity))?;
        Some(Money::new(cents, self.currency))
    }

    /// `percent`% of this amount, rounded half away from zero.
    pub fn percent_of(&self, percent: f64) -> Money {
        let cents = (self.amount_cents as f64 * percent / 100.0).round() as i64;
        Money::new(cents, self.currency)
    }

    /// Sum in `currency`; `None` on mismatch or overflow. Empty sums to zero.
    pub fn checked_sum<'a>(
        amounts: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn same_currency(&self, other: &Money) -> Option<()> {
        (self.currency == other.currency).then_some(())
    }
}

/// `$49.99`, `Rs.1500.00`, `-$5.00`. Formatted from the integer amount.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / per,
            abs % per
        )
    }
}
