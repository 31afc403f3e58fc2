//! Common utility functions for money calculations.
//!
//! This module provides the rounding and coercion rules shared by the
//! estimate calculator, the submit-time validation and the receivable
//! and report summaries.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use shop_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero when it is negative.
///
/// The calculator never lets a negative operand reduce a total; negative
/// entries are rejected at submit time instead.
///
/// ```
/// use rust_decimal_macros::dec;
/// use shop_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-4.50)), dec!(0));
/// assert_eq!(non_negative(dec!(4.50)), dec!(4.50));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Applies a percentage rate (e.g. `8` for 8%) to an amount.
///
/// Saturates at [`Decimal::MAX`] instead of overflowing.
pub fn percent_of(
    amount: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    amount.saturating_mul(non_negative(rate_percent)) / Decimal::ONE_HUNDRED
}

/// Sums money values, saturating at the representable bounds.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use shop_core::calculations::common::saturating_sum;
///
/// assert_eq!(saturating_sum([dec!(1.25), dec!(2)]), dec!(3.25));
/// assert_eq!(saturating_sum([Decimal::MAX, dec!(1)]), Decimal::MAX);
/// ```
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Normalizes form input for decimal parsing: trims whitespace and removes
/// commas used as thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses user-entered text into a [`Decimal`], treating anything that is
/// not a number as zero.
///
/// Accepts comma thousands separators and scientific notation. Blank input
/// is zero without a warning; unparseable input is zero with a warning.
///
/// ```
/// use rust_decimal_macros::dec;
/// use shop_core::calculations::common::parse_lenient;
///
/// assert_eq!(parse_lenient("1,234.50"), dec!(1234.50));
/// assert_eq!(parse_lenient("abc"), dec!(0));
/// assert_eq!(parse_lenient(""), dec!(0));
/// ```
pub fn parse_lenient(s: &str) -> Decimal {
    try_parse(s).unwrap_or_else(|| {
        if !s.trim().is_empty() {
            tracing::warn!(input = %s, "non-numeric input coerced to zero");
        }
        Decimal::ZERO
    })
}

/// Parses user-entered text into a [`Decimal`], returning `None` for blank
/// or unparseable input.
pub fn try_parse(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}
