//! # belle-core: Foundational Types for the Belle Marketplace
//!
//! Leaf crate of the workspace. It defines the primitives shared by the
//! receipt reconciler (`belle-tax`) and the onboarding wizard
//! (`belle-wizard`). It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One rounding rule.** Every monetary figure that leaves the workspace
//!    is computed in [`Decimal`] and rounded half-up by [`round_money`].
//!    Both receipt forms used to round on their own; they now share it.
//!
//! 2. **Bad numbers become zero.** [`normalize_amount`] maps negative, NaN,
//!    infinite and over-[`MAX_AMOUNT`] inputs to `0.0` instead of raising.
//!    Form inputs are already type-constrained upstream.
//!
//! 3. **Rates are percentages.** [`TaxRateConfig`] stores `5.0` for 5%. The
//!    default is the Québec TPS/TVQ pair.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] is always UTC, seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `belle-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod amount;
pub mod error;
pub mod identity;
pub mod rates;
pub mod temporal;

pub use amount::{
    format_amount, normalize_amount, round_money, round_to_cents, to_cents, to_decimal, to_f64,
    DECIMAL_PLACES, MAX_AMOUNT, MONEY_TOLERANCE,
};
pub use error::BelleError;
pub use identity::SubmissionId;
pub use rates::TaxRateConfig;
pub use temporal::Timestamp;

pub use rust_decimal::Decimal;
