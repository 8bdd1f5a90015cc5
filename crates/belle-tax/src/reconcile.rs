//! # Tax Reconciler
//!
//! ## Reconcile (tax-inclusive → parts)
//!
//! ```text
//! factor   = 1 + tps% / 100 + tvq% / 100
//! subtotal = total / factor
//! tps      = subtotal * tps% / 100
//! tvq      = subtotal * tvq% / 100
//! ```
//!
//! The division-factor form is exact: the naive "total minus 14.975%" gives
//! a different (wrong) subtotal.
//!
//! ## Gross-up (pre-tax → total)
//!
//! ```text
//! tps   = subtotal * tps% / 100
//! tvq   = subtotal * tvq% / 100
//! total = subtotal + tps + tvq
//! ```
//!
//! In both directions the arithmetic runs in [`Decimal`] and each output is
//! rounded half-up to cents from the unrounded intermediates. Nothing is
//! summed after rounding.
//!
//! ## Laws
//!
//! For whole-cent totals and any rates, the rounded parts of [`reconcile`]
//! sum to the total within one cent ([`MONEY_TOLERANCE`]).
//!
//! Feeding the reconciled subtotal back into [`gross_up`] reproduces the
//! total within `0.005 * (factor + 1)` dollars: half a cent of subtotal
//! rounding scaled by the factor, plus half a cent for the total itself.
//! That is one cent while the factor stays below 3 (combined rates under
//! 200%), and grows beyond it for larger rates.

use serde::{Deserialize, Serialize};

use belle_core::{normalize_amount, to_decimal, to_f64, Decimal, TaxRateConfig, MONEY_TOLERANCE};

/// The four figures shown on a receipt form.
///
/// A fresh value (`Default`) is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptAmounts {
    /// Tax-inclusive total.
    pub total_amount: f64,
    /// Pre-tax base.
    pub subtotal: f64,
    /// Federal tax portion.
    pub tps: f64,
    /// Provincial tax portion.
    pub tvq: f64,
}

impl ReceiptAmounts {
    /// Sum of the three parts, in dollars.
    pub fn parts_sum(&self) -> f64 {
        to_f64(self.parts_sum_decimal())
    }

    /// `total - (subtotal + tps + tvq)`, rounded to cents.
    ///
    /// Zero, or one cent either way, for whole-cent totals.
    pub fn rounding_drift(&self) -> f64 {
        to_f64(self.drift())
    }

    /// Whether the parts add up to the total within [`MONEY_TOLERANCE`].
    pub fn is_within_tolerance(&self) -> bool {
        self.drift().abs() <= MONEY_TOLERANCE
    }

    /// Whether every figure is zero.
    pub fn is_zero(&self) -> bool {
        self.total_amount == 0.0 && self.subtotal == 0.0 && self.tps == 0.0 && self.tvq == 0.0
    }

    fn parts_sum_decimal(&self) -> Decimal {
        to_decimal(self.subtotal) + to_decimal(self.tps) + to_decimal(self.tvq)
    }

    fn drift(&self) -> Decimal {
        to_decimal(self.total_amount) - self.parts_sum_decimal()
    }
}

/// Split a tax-inclusive total into subtotal, TPS and TVQ.
///
/// A zero, negative, non-numeric or out-of-range total yields all zeros.
/// Bad rates are read as zero. The total is returned as given (after
/// normalization), not rounded.
pub fn reconcile(total_amount: f64, rates: &TaxRateConfig) -> ReceiptAmounts {
    let total_amount = normalize_amount(total_amount);
    if total_amount == 0.0 {
        return ReceiptAmounts::default();
    }

    let subtotal = to_decimal(total_amount) / rates.division_factor();

    let amounts = ReceiptAmounts {
        total_amount,
        subtotal: to_f64(subtotal),
        tps: to_f64(subtotal * rates.tps_fraction()),
        tvq: to_f64(subtotal * rates.tvq_fraction()),
    };
    tracing::debug!(
        total = amounts.total_amount,
        subtotal = amounts.subtotal,
        tps = amounts.tps,
        tvq = amounts.tvq,
        "reconciled tax-inclusive total"
    );
    amounts
}

/// Build TPS, TVQ and the tax-inclusive total from a pre-tax subtotal.
///
/// Same normalization rules as [`reconcile`]. All four outputs are rounded
/// to cents; the total is rounded from the unrounded taxes.
///
/// `gross_up(reconcile(t).subtotal)` gives back `t` within one cent only
/// while the division factor is below 3; see the module docs for the
/// general bound.
pub fn gross_up(subtotal: f64, rates: &TaxRateConfig) -> ReceiptAmounts {
    let subtotal = to_decimal(normalize_amount(subtotal));
    if subtotal.is_zero() {
        return ReceiptAmounts::default();
    }

    let tps = subtotal * rates.tps_fraction();
    let tvq = subtotal * rates.tvq_fraction();

    let amounts = ReceiptAmounts {
        total_amount: to_f64(subtotal + tps + tvq),
        subtotal: to_f64(subtotal),
        tps: to_f64(tps),
        tvq: to_f64(tvq),
    };
    tracing::debug!(
        total = amounts.total_amount,
        subtotal = amounts.subtotal,
        "grossed up pre-tax subtotal"
    );
    amounts
}
