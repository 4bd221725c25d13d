//! Currency helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed sales tax applied to every invoice subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Number of fractional digits kept for stored amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Round an amount to currency precision, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
