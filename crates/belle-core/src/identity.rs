//! # Identifiers
//!
//! Newtype wrappers so a submission id cannot be confused with any other
//! UUID flowing through the onboarding pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an assembled wizard submission.
///
/// Generated when the aggregate is handed to the API client so that a retry
/// by the caller can be de-duplicated server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    /// Generate a new random submission identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "submission:{}", self.0)
    }
}
