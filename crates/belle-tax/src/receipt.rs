//! # Receipt Entry
//!
//! The manual receipt form and the scan-analysis form both end up here, so
//! both round the same way.
//!
//! [`ReceiptEntry`] is an immutable value. Each `with_*` edit returns a new
//! entry whose amounts were recomputed from scratch; nothing is carried over
//! from the previous amounts.

use serde::{Deserialize, Serialize};

use belle_core::{normalize_amount, TaxRateConfig};

use crate::reconcile::{gross_up, reconcile, ReceiptAmounts};

/// Which figure the receipt data provides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum AmountSource {
    /// A tax-inclusive total (manual entry).
    TaxInclusive(f64),
    /// A pre-tax subtotal (optical extraction).
    PreTax(f64),
}

impl AmountSource {
    /// Derive all four receipt figures from this source.
    pub fn resolve(&self, rates: &TaxRateConfig) -> ReceiptAmounts {
        match *self {
            Self::TaxInclusive(total) => reconcile(total, rates),
            Self::PreTax(subtotal) => gross_up(subtotal, rates),
        }
    }
}

/// State of a receipt form: the user-entered total, the rates in effect,
/// and the amounts derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReceiptEntry {
    rates: TaxRateConfig,
    total: Option<f64>,
    amounts: ReceiptAmounts,
}

impl ReceiptEntry {
    /// A blank form: no total, all amounts zero.
    pub fn new(rates: TaxRateConfig) -> Self {
        Self {
            rates,
            total: None,
            amounts: ReceiptAmounts::default(),
        }
    }

    /// Set (or clear) the tax-inclusive total.
    pub fn with_total(&self, total: Option<f64>) -> Self {
        Self::compute(self.rates, total)
    }

    /// Change the TPS rate, in percent.
    pub fn with_tps_rate(&self, tps_rate_percent: f64) -> Self {
        let rates = TaxRateConfig {
            tps_rate_percent,
            ..self.rates
        };
        Self::compute(rates, self.total)
    }

    /// Change the TVQ rate, in percent.
    pub fn with_tvq_rate(&self, tvq_rate_percent: f64) -> Self {
        let rates = TaxRateConfig {
            tvq_rate_percent,
            ..self.rates
        };
        Self::compute(rates, self.total)
    }

    /// Replace both rates.
    pub fn with_rates(&self, rates: TaxRateConfig) -> Self {
        Self::compute(rates, self.total)
    }

    /// The rates currently applied.
    pub fn rates(&self) -> &TaxRateConfig {
        &self.rates
    }

    /// The total as entered, if any.
    pub fn total(&self) -> Option<f64> {
        self.total
    }

    /// The derived figures.
    pub fn amounts(&self) -> &ReceiptAmounts {
        &self.amounts
    }

    fn compute(rates: TaxRateConfig, total: Option<f64>) -> Self {
        let amounts = match total {
            Some(total) => reconcile(total, &rates),
            None => ReceiptAmounts::default(),
        };
        Self {
            rates,
            total,
            amounts,
        }
    }
}

/// Figures extracted from a receipt image. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannedReceipt {
    /// Tax-inclusive total, if found.
    #[serde(default)]
    pub total: Option<f64>,
    /// Pre-tax subtotal, if found.
    #[serde(default)]
    pub subtotal: Option<f64>,
    /// TPS line, if found. Informational only; recomputed from the rates.
    #[serde(default)]
    pub tps: Option<f64>,
    /// TVQ line, if found. Informational only; recomputed from the rates.
    #[serde(default)]
    pub tvq: Option<f64>,
}

impl ScannedReceipt {
    /// Pick the authoritative figure: the total when present and positive,
    /// otherwise the subtotal.
    pub fn to_source(&self) -> Option<AmountSource> {
        let usable = |v: Option<f64>| v.map(normalize_amount).filter(|v| *v > 0.0);
        usable(self.total)
            .map(AmountSource::TaxInclusive)
            .or_else(|| usable(self.subtotal).map(AmountSource::PreTax))
    }

    /// Resolve the scan into receipt figures. All zeros when the scan
    /// found neither a total nor a subtotal.
    pub fn amounts(&self, rates: &TaxRateConfig) -> ReceiptAmounts {
        match self.to_source() {
            Some(source) => source.resolve(rates),
            None => {
                tracing::warn!("scanned receipt has no usable total or subtotal");
                ReceiptAmounts::default()
            }
        }
    }
}
