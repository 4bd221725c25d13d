//! Invoice total calculator.
//!
//! `subtotal = Σ quantity × unit_price`, `tax = subtotal × TAX_RATE`,
//! `total = subtotal + tax`. Every figure is rounded to currency precision
//! so that repeated recomputation never drifts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{round_currency, TAX_RATE};

/// Derived monetary figures of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Compute totals from `(quantity, unit_price)` pairs.
    ///
    /// An invoice without lines yields all-zero totals.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (i32, Decimal)>,
    {
        let subtotal = lines
            .into_iter()
            .map(|(quantity, unit_price)| Decimal::from(quantity) * unit_price)
            .sum::<Decimal>();

        Self::from_subtotal(subtotal)
    }

    /// Derive tax and total from an already summed subtotal.
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let subtotal = round_currency(subtotal);
        let tax = round_currency(subtotal * TAX_RATE);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
