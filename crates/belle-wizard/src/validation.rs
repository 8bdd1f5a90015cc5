//! # Step Completeness
//!
//! The form layer normally decides whether a step is valid. For callers
//! without one (the CLI, tests), each step declares its required fields and
//! this module checks them.
//!
//! A required field counts as missing when it is absent, `null`, a blank
//! string, an empty array or `false`. Required booleans are consent boxes
//! and must be ticked.

use serde_json::Value;

use crate::machine::{StepId, StepPayload, WizardState};

/// Required fields of `step` that `payload` does not fill, in declaration order.
pub fn missing_fields<S: StepId>(step: S, payload: Option<&StepPayload>) -> Vec<&'static str> {
    step.required_fields()
        .iter()
        .copied()
        .filter(|field| !payload.and_then(|p| p.get(*field)).is_some_and(is_filled))
        .collect()
}

/// Whether the visible step has all its required fields.
///
/// This is the flag to pass to [`WizardState::advance`].
pub fn is_current_step_complete<S: StepId>(state: &WizardState<S>) -> bool {
    let step = state.current_step();
    let missing = missing_fields(step, state.step_data(step));
    if !missing.is_empty() {
        tracing::debug!(%step, ?missing, "step incomplete");
    }
    missing.is_empty()
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}
