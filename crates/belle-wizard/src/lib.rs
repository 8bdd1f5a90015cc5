//! # belle-wizard: Onboarding Wizard State Machine
//!
//! A wizard shows one step of a larger form at a time. This crate owns the
//! navigation rules and the data the steps collect; the UI renders whatever
//! [`WizardState`] says and feeds edits back in.
//!
//! ## Machine
//!
//! ```text
//! step 0 ──advance(valid)──▶ step 1 ──▶ … ──▶ step N-1
//!        ◀──────retreat──────        ◀──
//! jump_to(i): any index in 0..N, no gating
//! ```
//!
//! There is no state past `N-1`. "Next" on the last step is the caller's
//! submit action; see [`submission`].
//!
//! ## Design
//!
//! Every operation borrows the state and returns a new one. The old value
//! is never touched, so a renderer comparing old and new sees exactly what
//! changed. Refused transitions return a [`WizardError`] and leave the
//! caller holding the unchanged state.
//!
//! ## Flows
//!
//! - **Provider registration** ([`RegistrationStep`]): account, business,
//!   services, availability, payout, review.
//! - **Identity verification** ([`VerificationStep`]): document type, front,
//!   back, selfie, review.

pub mod flows;
pub mod machine;
pub mod submission;
pub mod validation;

pub use flows::{
    Flow, FlowKind, IdentityVerification, ProviderRegistration, RegistrationStep, VerificationStep,
};
pub use machine::{StepId, StepPayload, WizardError, WizardState};
pub use submission::{submit, SubmitError, Submission, Submitter};
pub use validation::{is_current_step_complete, missing_fields};
