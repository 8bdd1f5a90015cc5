//! # belle-cli: Belle Command-Line Interface
//!
//! Drives the marketplace core from a terminal: split or gross up receipt
//! amounts, and walk an onboarding wizard whose state lives in a JSON
//! session file between invocations.
//!
//! ## Subcommands
//!
//! - `receipt`: `reconcile`, `gross-up`, `scan`
//! - `wizard`: `start`, `set`, `next`, `back`, `jump`, `show`, `submit`
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `belle-tax` and `belle-wizard`; no tax or
//!   navigation rules live here.

pub mod config;
pub mod logging;
pub mod receipt;
pub mod wizard;
