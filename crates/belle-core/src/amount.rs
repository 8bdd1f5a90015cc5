//! # Monetary Amounts
//!
//! Receipt amounts travel as `f64` dollars because that is what the form
//! layer and the OCR extraction hand us. Arithmetic on them happens in
//! [`Decimal`]: an amount is converted once on the way in ([`to_decimal`]),
//! computed and rounded in base 10, and converted back on the way out
//! ([`to_f64`]). Binary floats never take part in a rounding decision, so a
//! decimal midpoint such as `0.145` rounds up to `0.15`.
//!
//! - [`normalize_amount`] maps anything that is not a finite, non-negative
//!   number no larger than [`MAX_AMOUNT`] to `0.0`.
//! - [`round_money`] rounds half-up (away from zero) to 2 decimal places.
//!
//! Conversion to integer cents ([`to_cents`]) and display formatting
//! ([`format_amount`]) are provided for callers that compare or print amounts.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Money is kept to the cent.
pub const DECIMAL_PLACES: u32 = 2;

/// One cent. The reconciliation tolerance is expressed in this unit.
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest amount (or rate percentage) accepted, in dollars. Anything above
/// reads as zero.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Normalize a user- or scanner-supplied number.
///
/// Negative, NaN, infinite and over-[`MAX_AMOUNT`] values become `0.0`.
/// `-0.0` also becomes `0.0` so that zero results never print as `-0.00`.
pub fn normalize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 && value <= MAX_AMOUNT {
        value
    } else {
        if value > MAX_AMOUNT {
            tracing::warn!(value, max = MAX_AMOUNT, "amount above maximum normalized to zero");
        } else if value != 0.0 {
            tracing::warn!(value, "non-numeric or negative input normalized to zero");
        }
        0.0
    }
}

/// Convert an `f64` to [`Decimal`] for calculation.
///
/// Uses the shortest decimal that the float stands for (`1.005` becomes
/// `1.005`, not `1.00499999...`). Non-finite values and magnitudes above
/// [`MAX_AMOUNT`] convert to zero.
pub fn to_decimal(value: f64) -> Decimal {
    if value.abs() > MAX_AMOUNT {
        tracing::warn!(value, max = MAX_AMOUNT, "amount out of range, using zero");
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value, "non-finite amount, using zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents and convert back to dollars as `f64`.
///
/// The result is the float nearest to the rounded decimal, so `91.31`
/// compares equal to the literal `91.31`.
pub fn to_f64(value: Decimal) -> f64 {
    decimal_cents(value) as f64 / 100.0
}

/// Round an `f64` to 2 decimal places, half-up on its decimal value.
///
/// 1.005 → 1.01, 0.125 → 0.13, 91.3068 → 91.31
pub fn round_to_cents(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Convert a dollar amount to whole cents, rounding half-up.
pub fn to_cents(value: f64) -> i64 {
    decimal_cents(to_decimal(value))
}

/// Format a dollar amount with exactly 2 decimal places.
///
/// 91.3068 → "91.31", 4.5 → "4.50", -0.004 → "0.00"
pub fn format_amount(value: f64) -> String {
    let cents = to_cents(value);
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn decimal_cents(value: Decimal) -> i64 {
    round_money(value)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .unwrap_or_else(|| {
            tracing::warn!(%value, "amount does not fit in cents, using zero");
            0
        })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rounding moves a value by at most half a cent.
        #[test]
        fn rounding_error_is_bounded(value in 0.0f64..1_000_000.0) {
            let d = to_decimal(value);
            let rounded = round_money(d);
            prop_assert!((rounded - d).abs() <= Decimal::new(5, 3));
        }

        /// Normalized amounts are never negative, never NaN, never huge.
        #[test]
        fn normalize_is_total(value in any::<f64>()) {
            let n = normalize_amount(value);
            prop_assert!(n.is_finite());
            prop_assert!(n >= 0.0);
            prop_assert!(n <= MAX_AMOUNT);
        }

        /// Whole-cent inputs survive the cents conversion unchanged.
        #[test]
        fn whole_cents_roundtrip(cents in 0i64..100_000_000) {
            prop_assert_eq!(to_cents(cents as f64 / 100.0), cents);
        }

        /// Formatting never panics, whatever the float.
        #[test]
        fn format_is_total(value in any::<f64>()) {
            prop_assert!(format_amount(value).contains('.'));
        }
    }
}
