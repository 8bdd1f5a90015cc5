//! # Submission
//!
//! "Next" on the last step hands the collected data to the API client. The
//! machine does not model that action; this module assembles the payload
//! and defines the seam to whatever sends it.
//!
//! A rejected submission leaves the wizard state with the caller, who can
//! let the user fix the data and try again. Nothing here retries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use belle_core::{SubmissionId, Timestamp};

use crate::flows::{Flow, FlowKind};
use crate::machine::{StepId, StepPayload, WizardError, WizardState};

/// The aggregate sent to the API when a wizard is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Ord + Deserialize<'de>"
))]
pub struct Submission<S> {
    /// Fresh id for this submission attempt.
    pub id: SubmissionId,
    /// The flow that produced it.
    pub flow: FlowKind,
    /// When it was assembled.
    pub submitted_at: Timestamp,
    /// Data of every step, keyed by step.
    pub data: BTreeMap<S, StepPayload>,
}

impl<S: StepId> Submission<S> {
    /// Assemble the submission from a wizard of flow `F` on its last step.
    /// The flow is stamped from `F::KIND`.
    ///
    /// # Errors
    ///
    /// - [`WizardError::NotAtFinalStep`] if the wizard is not on its last step.
    /// - [`WizardError::Validation`] if the last step is not valid.
    pub fn assemble<F: Flow<Step = S>>(
        state: &WizardState<S>,
        is_current_step_valid: bool,
    ) -> Result<Self, WizardError> {
        if !state.is_last() {
            return Err(WizardError::NotAtFinalStep {
                step: state.current_step().to_string(),
            });
        }
        if !is_current_step_valid {
            return Err(WizardError::Validation {
                step: state.current_step().to_string(),
            });
        }
        let submission = Self {
            id: SubmissionId::new(),
            flow: F::KIND,
            submitted_at: Timestamp::now(),
            data: state.data().clone(),
        };
        tracing::info!(
            id = %submission.id,
            flow = %submission.flow,
            steps = submission.data.len(),
            "assembled submission"
        );
        Ok(submission)
    }
}

/// Sends an assembled submission to the remote API.
pub trait Submitter<S> {
    /// Transport or API rejection error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deliver `submission`. Success means the remote side accepted it.
    fn submit(&mut self, submission: &Submission<S>) -> Result<(), Self::Error>;
}

/// Failure of [`submit`].
#[derive(Error, Debug)]
pub enum SubmitError<E: std::error::Error + 'static> {
    /// The wizard was not ready to submit.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The submitter refused or failed to deliver.
    #[error("submission rejected: {0}")]
    Rejected(#[source] E),
}

/// Assemble and deliver in one call. Returns the id of the accepted submission.
pub fn submit<F, T>(
    state: &WizardState<F::Step>,
    is_current_step_valid: bool,
    submitter: &mut T,
) -> Result<SubmissionId, SubmitError<T::Error>>
where
    F: Flow,
    T: Submitter<F::Step>,
{
    let submission = Submission::assemble::<F>(state, is_current_step_valid)?;
    submitter.submit(&submission).map_err(SubmitError::Rejected)?;
    Ok(submission.id)
}
