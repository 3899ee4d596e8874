//! Money helpers built on decimal arithmetic.
//!
//! The backend stores prices as `DECIMAL(10, 2)` and serializes them as JSON
//! strings (`"9.99"`). `rust_decimal::Decimal` deserializes from either a
//! string or a number, so entity types use it directly.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole cents, halves away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount in US dollars with thousands separators, e.g. `$1,234.50`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}
