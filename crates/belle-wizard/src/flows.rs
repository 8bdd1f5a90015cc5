//! # Onboarding Flows
//!
//! The two wizards of the marketplace. Both run on the same
//! [`WizardState`] machine; they differ only in their steps and in which
//! fields each step requires.

use serde::{Deserialize, Serialize};

use crate::machine::{StepId, WizardError, WizardState};

/// Which wizard a session or submission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// A salon or independent provider signing up.
    ProviderRegistration,
    /// A provider proving their identity with a document and a selfie.
    IdentityVerification,
}

impl FlowKind {
    /// Return the string representation of this flow.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderRegistration => "provider_registration",
            Self::IdentityVerification => "identity_verification",
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, fixed sequence of steps.
pub trait Flow {
    /// Step identifier type of this flow.
    type Step: StepId;

    /// Which flow this is.
    const KIND: FlowKind;

    /// The steps, in order.
    fn steps() -> &'static [Self::Step];

    /// A fresh wizard on the first step.
    fn start() -> Result<WizardState<Self::Step>, WizardError> {
        WizardState::new(Self::steps().to_vec())
    }
}

// ─── Provider Registration ───────────────────────────────────────────

/// Steps of the provider registration funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    /// Contact person and login.
    Account,
    /// Legal name, type and address of the business.
    Business,
    /// Services offered, with durations and prices.
    Services,
    /// Opening days and hours.
    Availability,
    /// Bank details for payouts.
    Payout,
    /// Summary and acceptance of terms.
    Review,
}

impl StepId for RegistrationStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Business => "business",
            Self::Services => "services",
            Self::Availability => "availability",
            Self::Payout => "payout",
            Self::Review => "review",
        }
    }

    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Account => &["first_name", "last_name", "email", "phone"],
            Self::Business => &["business_name", "business_type", "address", "city", "postal_code"],
            Self::Services => &["services"],
            Self::Availability => &["working_days", "opening_time", "closing_time"],
            Self::Payout => &[
                "account_holder",
                "institution_number",
                "transit_number",
                "account_number",
            ],
            Self::Review => &["accepted_terms"],
        }
    }
}

impl std::fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker for the provider registration flow.
#[derive(Debug, Clone, Copy)]
pub struct ProviderRegistration;

impl Flow for ProviderRegistration {
    type Step = RegistrationStep;
    const KIND: FlowKind = FlowKind::ProviderRegistration;

    fn steps() -> &'static [RegistrationStep] {
        &[
            RegistrationStep::Account,
            RegistrationStep::Business,
            RegistrationStep::Services,
            RegistrationStep::Availability,
            RegistrationStep::Payout,
            RegistrationStep::Review,
        ]
    }
}

// ─── Identity Verification ───────────────────────────────────────────

/// Steps of the identity verification flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStep {
    /// Passport, driver's licence or provincial ID card.
    DocumentType,
    /// Upload of the document front.
    DocumentFront,
    /// Upload of the document back.
    DocumentBack,
    /// Live selfie for face matching.
    Selfie,
    /// Confirmation before sending.
    Review,
}

impl StepId for VerificationStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentType => "document_type",
            Self::DocumentFront => "document_front",
            Self::DocumentBack => "document_back",
            Self::Selfie => "selfie",
            Self::Review => "review",
        }
    }

    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::DocumentType => &["document_type"],
            Self::DocumentFront => &["front_image"],
            Self::DocumentBack => &["back_image"],
            Self::Selfie => &["selfie_image"],
            Self::Review => &["confirmed"],
        }
    }
}

impl std::fmt::Display for VerificationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker for the identity verification flow.
#[derive(Debug, Clone, Copy)]
pub struct IdentityVerification;

impl Flow for IdentityVerification {
    type Step = VerificationStep;
    const KIND: FlowKind = FlowKind::IdentityVerification;

    fn steps() -> &'static [VerificationStep] {
        &[
            VerificationStep::DocumentType,
            VerificationStep::DocumentFront,
            VerificationStep::DocumentBack,
            VerificationStep::Selfie,
            VerificationStep::Review,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_starts_on_account() {
        let w = ProviderRegistration::start().unwrap();
        assert_eq!(w.current_step(), RegistrationStep::Account);
        assert_eq!(w.step_count(), 6);
    }

    #[test]
    fn verification_starts_on_document_type() {
        let w = IdentityVerification::start().unwrap();
        assert_eq!(w.current_step(), VerificationStep::DocumentType);
        assert_eq!(w.step_count(), 5);
    }

    #[test]
    fn serde_names_match_as_str() {
        for step in ProviderRegistration::steps() {
            let json = serde_json::to_value(step).unwrap();
            assert_eq!(json, step.as_str());
        }
        for step in IdentityVerification::steps() {
            let json = serde_json::to_value(step).unwrap();
            assert_eq!(json, step.as_str());
        }
    }

    #[test]
    fn every_step_requires_something() {
        assert!(ProviderRegistration::steps()
            .iter()
            .all(|s| !s.required_fields().is_empty()));
        assert!(IdentityVerification::steps()
            .iter()
            .all(|s| !s.required_fields().is_empty()));
    }

    #[test]
    fn flow_kind_display() {
        assert_eq!(ProviderRegistration::KIND.to_string(), "provider_registration");
        assert_eq!(IdentityVerification::KIND.to_string(), "identity_verification");
    }
}
