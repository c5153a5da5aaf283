//! Order totals from a cart snapshot.
//!
//! Everything is computed in exact decimal arithmetic and only rounded for display
//! (2 places, midpoint away from zero).

use crate::model::Cart;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("tax rate must be between 0 and 1, got {0}")]
    TaxRateOutOfRange(Decimal),

    #[error("not a decimal tax rate: {0:?}")]
    MalformedTaxRate(String),
}

/// A tax rate as a fraction of the subtotal, e.g. `0.17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub fn new(rate: Decimal) -> Result<Self, PricingError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(PricingError::TaxRateOutOfRange(rate));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for TaxRate {
    /// 17%
    fn default() -> Self {
        Self(Decimal::new(17, 2))
    }
}

impl FromStr for TaxRate {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate = Decimal::from_str(s.trim())
            .map_err(|_| PricingError::MalformedTaxRate(s.to_string()))?;
        Self::new(rate)
    }
}

impl Display for TaxRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Subtotal, tax and grand total of one cart. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

impl OrderTotals {
    /// The same totals rounded to two places for display.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_for_display(self.subtotal),
            tax: round_for_display(self.tax),
            grand_total: round_for_display(self.grand_total),
        }
    }
}

/// `subtotal = Σ price × quantity`, `tax = subtotal × rate`, `grand_total = subtotal + tax`.
pub fn compute_totals(cart: &Cart, tax_rate: TaxRate) -> OrderTotals {
    let subtotal: Decimal = cart.lines().iter().map(|line| line.line_total()).sum();
    let tax = subtotal * tax_rate.value();
    OrderTotals {
        subtotal,
        tax,
        grand_total: subtotal + tax,
    }
}

/// Rounds to 2 places, half away from zero, and always keeps two fraction digits.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// `"PKR 1170.00"`
pub fn format_amount(currency: &str, amount: Decimal) -> String {
    format!("{currency} {}", round_for_display(amount))
}
