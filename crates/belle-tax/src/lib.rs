//! # belle-tax: Receipt Tax Reconciliation
//!
//! Receipts reach the back office in two shapes:
//!
//! - **Manual entry**: the user types the tax-inclusive total they paid.
//!   [`reconcile`] splits it into subtotal, TPS and TVQ.
//! - **Optical scan**: the extraction usually finds the pre-tax subtotal.
//!   [`gross_up`] rebuilds the taxes and the total from it.
//!
//! Both directions round each derived figure to cents independently, so the
//! three parts of a reconciled receipt may miss the total by one cent. That
//! drift is expected and exposed through [`ReceiptAmounts::rounding_drift`].
//!
//! [`ReceiptEntry`] models the receipt form itself: every edit of the total
//! or a rate yields a new entry with all derived amounts recomputed.

pub mod receipt;
pub mod reconcile;

pub use receipt::{AmountSource, ReceiptEntry, ScannedReceipt};
pub use reconcile::{gross_up, reconcile, ReceiptAmounts};

pub use belle_core::TaxRateConfig;
