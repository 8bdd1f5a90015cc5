//! # Sales-Tax Rate Configuration
//!
//! Two independent percentage taxes applied to the same pre-tax base:
//! TPS (federal GST) and TVQ (Québec QST). Nothing here is Québec-specific
//! beyond the defaults; any pair of non-negative rates is accepted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::{normalize_amount, to_decimal, MAX_AMOUNT};
use crate::error::BelleError;

/// Default federal rate (TPS), in percent.
pub const DEFAULT_TPS_RATE_PERCENT: f64 = 5.0;

/// Default provincial rate (TVQ), in percent.
pub const DEFAULT_TVQ_RATE_PERCENT: f64 = 9.975;

/// The two tax rates used to split a receipt, expressed as percentages.
///
/// `5.0` means 5%. Deserialization does not validate; use
/// [`TaxRateConfig::validate`] (or construct through [`TaxRateConfig::new`])
/// when the values come from a config file. A missing field takes its
/// Québec default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRateConfig {
    /// Federal goods and services tax, in percent.
    pub tps_rate_percent: f64,
    /// Provincial sales tax, in percent.
    pub tvq_rate_percent: f64,
}

impl TaxRateConfig {
    /// Build a validated rate pair.
    ///
    /// # Errors
    ///
    /// Returns [`BelleError::InvalidRate`] if either rate is negative,
    /// NaN, infinite or above [`MAX_AMOUNT`].
    pub fn new(tps_rate_percent: f64, tvq_rate_percent: f64) -> Result<Self, BelleError> {
        let rates = Self {
            tps_rate_percent,
            tvq_rate_percent,
        };
        rates.validate()?;
        Ok(rates)
    }

    /// The Québec pair: TPS 5%, TVQ 9.975%.
    pub const fn quebec() -> Self {
        Self {
            tps_rate_percent: DEFAULT_TPS_RATE_PERCENT,
            tvq_rate_percent: DEFAULT_TVQ_RATE_PERCENT,
        }
    }

    /// Check both rates are finite, non-negative and within [`MAX_AMOUNT`].
    pub fn validate(&self) -> Result<(), BelleError> {
        check_rate("tps", self.tps_rate_percent)?;
        check_rate("tvq", self.tvq_rate_percent)
    }

    /// TPS as a fraction (`0.05` for 5%). Bad values read as zero.
    pub fn tps_fraction(&self) -> Decimal {
        percent_to_fraction(self.tps_rate_percent)
    }

    /// TVQ as a fraction (`0.09975` for 9.975%). Bad values read as zero.
    pub fn tvq_fraction(&self) -> Decimal {
        percent_to_fraction(self.tvq_rate_percent)
    }

    /// `1 + tps + tvq`: the factor that turns a pre-tax base into a
    /// tax-inclusive total.
    pub fn division_factor(&self) -> Decimal {
        Decimal::ONE + self.tps_fraction() + self.tvq_fraction()
    }
}

impl Default for TaxRateConfig {
    fn default() -> Self {
        Self::quebec()
    }
}

fn percent_to_fraction(percent: f64) -> Decimal {
    to_decimal(normalize_amount(percent)) / Decimal::ONE_HUNDRED
}

fn check_rate(name: &'static str, value: f64) -> Result<(), BelleError> {
    if value.is_finite() && (0.0..=MAX_AMOUNT).contains(&value) {
        Ok(())
    } else {
        Err(BelleError::InvalidRate { name, value })
    }
}
