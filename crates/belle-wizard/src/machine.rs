//! # Wizard State Machine
//!
//! A linear sequence of named steps with a cursor and the data collected
//! so far.
//!
//! ## States
//!
//! Each step index `0..N` is a state. `advance` is gated on a validity flag
//! the caller computes; `retreat` and `jump_to` are not gated.
//!
//! ## Invariants
//!
//! - `steps` is non-empty and holds no duplicates.
//! - `0 <= current_index < steps.len()`.
//! - `data` only holds keys that are steps of this wizard, and no operation
//!   removes an entry from it.
//!
//! The invariants are checked on construction and again on deserialization,
//! so a hand-edited session file cannot produce an out-of-range cursor.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The data a single step collects: field name → value.
pub type StepPayload = Map<String, Value>;

/// Identifier of a wizard step.
///
/// Implemented by the per-flow step enums in [`crate::flows`].
pub trait StepId: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Stable machine name, used in session files and on the command line.
    fn as_str(&self) -> &'static str;

    /// Fields that must be filled before this step may be left forward.
    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// A refused wizard transition. The state the caller holds is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// Tried to advance while the current step is invalid.
    #[error("step {step} is not valid; cannot advance")]
    Validation {
        /// The step that failed validation.
        step: String,
    },

    /// Requested a step index that does not exist.
    #[error("step index {index} is out of range (wizard has {len} steps)")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of steps in the wizard.
        len: usize,
    },

    /// Referenced a step that is not part of this wizard.
    #[error("unknown step {step}")]
    UnknownStep {
        /// The unknown step name.
        step: String,
    },

    /// A wizard needs at least one step.
    #[error("wizard has no steps")]
    EmptyFlow,

    /// The same step was listed twice.
    #[error("step {step} appears more than once")]
    DuplicateStep {
        /// The repeated step.
        step: String,
    },

    /// Submission requested before reaching the last step.
    #[error("cannot submit from step {step}; submission happens on the last step")]
    NotAtFinalStep {
        /// The step the wizard is on.
        step: String,
    },
}

// ─── Wizard State ────────────────────────────────────────────────────

/// Navigation state and collected data of one wizard run.
///
/// Created when a flow starts; discarded after a successful submission or
/// when the user navigates away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawWizardState<S>",
    bound(serialize = "S: Serialize", deserialize = "S: StepId + DeserializeOwned")
)]
pub struct WizardState<S> {
    steps: Vec<S>,
    current_index: usize,
    data: BTreeMap<S, StepPayload>,
}

/// Unchecked wire form of [`WizardState`].
#[derive(Deserialize)]
#[serde(bound(deserialize = "S: Ord + Deserialize<'de>"))]
struct RawWizardState<S> {
    steps: Vec<S>,
    current_index: usize,
    #[serde(default)]
    data: BTreeMap<S, StepPayload>,
}

impl<S: StepId> TryFrom<RawWizardState<S>> for WizardState<S> {
    type Error = WizardError;

    fn try_from(raw: RawWizardState<S>) -> Result<Self, Self::Error> {
        let fresh = Self::new(raw.steps)?;
        let state = fresh.jump_to(raw.current_index)?;
        if let Some(stray) = raw.data.keys().find(|k| !state.steps.contains(k)) {
            return Err(WizardError::UnknownStep {
                step: stray.to_string(),
            });
        }
        Ok(Self {
            data: raw.data,
            ..state
        })
    }
}

impl<S: StepId> WizardState<S> {
    /// Start a wizard over `steps`, on the first step, with no data.
    ///
    /// # Errors
    ///
    /// [`WizardError::EmptyFlow`] for an empty sequence,
    /// [`WizardError::DuplicateStep`] if a step is listed twice.
    pub fn new(steps: Vec<S>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::EmptyFlow);
        }
        let mut seen = BTreeSet::new();
        for step in &steps {
            if !seen.insert(*step) {
                return Err(WizardError::DuplicateStep {
                    step: step.to_string(),
                });
            }
        }
        Ok(Self {
            steps,
            current_index: 0,
            data: BTreeMap::new(),
        })
    }

    /// Move forward one step if the current step is valid.
    ///
    /// On the last step a valid advance returns the state unchanged: moving
    /// past the end is the caller's submit action, not a transition.
    ///
    /// # Errors
    ///
    /// [`WizardError::Validation`] when `is_current_step_valid` is false.
    pub fn advance(&self, is_current_step_valid: bool) -> Result<Self, WizardError> {
        if !is_current_step_valid {
            tracing::debug!(step = %self.current_step(), "advance refused, step invalid");
            return Err(WizardError::Validation {
                step: self.current_step().to_string(),
            });
        }
        let mut next = self.clone();
        if !self.is_last() {
            next.current_index += 1;
            tracing::debug!(from = %self.current_step(), to = %next.current_step(), "advanced");
        }
        Ok(next)
    }

    /// Move back one step. No-op on the first step.
    pub fn retreat(&self) -> Self {
        let mut prev = self.clone();
        if !self.is_first() {
            prev.current_index -= 1;
            tracing::debug!(from = %self.current_step(), to = %prev.current_step(), "retreated");
        }
        prev
    }

    /// Merge `payload` into the data stored for `step`.
    ///
    /// Keys in `payload` replace the same keys already stored for that step;
    /// other keys of that step and all other steps are kept.
    ///
    /// # Errors
    ///
    /// [`WizardError::UnknownStep`] if `step` is not part of this wizard.
    pub fn update_step_data(&self, step: S, payload: StepPayload) -> Result<Self, WizardError> {
        if !self.steps.contains(&step) {
            return Err(WizardError::UnknownStep {
                step: step.to_string(),
            });
        }
        let mut next = self.clone();
        next.data.entry(step).or_default().extend(payload);
        Ok(next)
    }

    /// Put the cursor on `target_index` without any validation gating.
    ///
    /// # Errors
    ///
    /// [`WizardError::OutOfRange`] if `target_index >= step_count()`.
    pub fn jump_to(&self, target_index: usize) -> Result<Self, WizardError> {
        if target_index >= self.steps.len() {
            return Err(WizardError::OutOfRange {
                index: target_index,
                len: self.steps.len(),
            });
        }
        let mut next = self.clone();
        next.current_index = target_index;
        tracing::debug!(from = %self.current_step(), to = %next.current_step(), "jumped");
        Ok(next)
    }

    /// The ordered steps of this wizard.
    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Index of the visible step.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The visible step.
    pub fn current_step(&self) -> S {
        self.steps[self.current_index]
    }

    /// Whether the cursor is on the first step.
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    /// Whether the cursor is on the last step.
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.steps.len()
    }

    /// One-based position and total, for "step 2 of 5" labels.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.steps.len())
    }

    /// Position of `step` in the sequence.
    pub fn index_of(&self, step: S) -> Option<usize> {
        self.steps.iter().position(|s| *s == step)
    }

    /// Look a step up by its machine name.
    pub fn step_named(&self, name: &str) -> Option<S> {
        self.steps.iter().copied().find(|s| s.as_str() == name)
    }

    /// Data collected for `step`, if any.
    pub fn step_data(&self, step: S) -> Option<&StepPayload> {
        self.data.get(&step)
    }

    /// Data collected for every step.
    pub fn data(&self) -> &BTreeMap<S, StepPayload> {
        &self.data
    }

    /// Consume the state, keeping only the collected data.
    pub fn into_data(self) -> BTreeMap<S, StepPayload> {
        self.data
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Step {
        One,
        Two,
        Three,
        Four,
    }

    impl std::fmt::Display for Step {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl StepId for Step {
        fn as_str(&self) -> &'static str {
            match self {
                Self::One => "one",
                Self::Two => "two",
                Self::Three => "three",
                Self::Four => "four",
            }
        }
    }

    fn wizard() -> WizardState<Step> {
        WizardState::new(vec![Step::One, Step::Two, Step::Three, Step::Four]).unwrap()
    }

    fn payload(value: serde_json::Value) -> StepPayload {
        match value {
            Value::Object(map) => map,
            other => panic!("payload must be an object, got {other}"),
        }
    }

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn starts_on_first_step_with_no_data() {
        let w = wizard();
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.current_step(), Step::One);
        assert!(w.is_first());
        assert!(!w.is_last());
        assert!(w.data().is_empty());
        assert_eq!(w.progress(), (1, 4));
    }

    #[test]
    fn rejects_empty_flow() {
        assert_eq!(WizardState::<Step>::new(vec![]), Err(WizardError::EmptyFlow));
    }

    #[test]
    fn rejects_duplicate_steps() {
        let err = WizardState::new(vec![Step::One, Step::Two, Step::One]).unwrap_err();
        assert_eq!(
            err,
            WizardError::DuplicateStep {
                step: "one".to_string()
            }
        );
    }

    #[test]
    fn single_step_wizard_is_first_and_last() {
        let w = WizardState::new(vec![Step::Three]).unwrap();
        assert!(w.is_first());
        assert!(w.is_last());
        assert_eq!(w.advance(true).unwrap(), w);
        assert_eq!(w.retreat(), w);
    }

    // ── advance ─────────────────────────────────────────────────────

    #[test]
    fn advance_valid_moves_forward() {
        let w = wizard().advance(true).unwrap();
        assert_eq!(w.current_step(), Step::Two);
    }

    #[test]
    fn advance_invalid_is_refused() {
        let w = wizard();
        let err = w.advance(false).unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation {
                step: "one".to_string()
            }
        );
        assert_eq!(w.current_index(), 0);
    }

    #[test]
    fn advance_on_last_step_is_unchanged() {
        let last = wizard().jump_to(3).unwrap();
        let after = last.advance(true).unwrap();
        assert_eq!(after.current_index(), 3);
        assert_eq!(after, last);
    }

    // ── retreat ─────────────────────────────────────────────────────

    #[test]
    fn retreat_at_first_step_is_noop() {
        let w = wizard();
        assert_eq!(w.retreat(), w);
    }

    #[test]
    fn retreat_moves_back_one() {
        let w = wizard().jump_to(2).unwrap().retreat();
        assert_eq!(w.current_index(), 1);
    }

    // ── update_step_data ────────────────────────────────────────────

    #[test]
    fn update_merges_keys_last_write_wins() {
        let w = wizard()
            .update_step_data(Step::One, payload(json!({"name": "Ana", "city": "Laval"})))
            .unwrap()
            .update_step_data(Step::One, payload(json!({"city": "Montréal"})))
            .unwrap();
        let data = w.step_data(Step::One).unwrap();
        assert_eq!(data["name"], "Ana");
        assert_eq!(data["city"], "Montréal");
    }

    #[test]
    fn update_preserves_other_steps() {
        let w = wizard()
            .update_step_data(Step::One, payload(json!({"a": 1})))
            .unwrap()
            .update_step_data(Step::Three, payload(json!({"c": 3})))
            .unwrap();
        assert_eq!(w.step_data(Step::One).unwrap()["a"], 1);
        assert_eq!(w.step_data(Step::Three).unwrap()["c"], 3);
        assert!(w.step_data(Step::Two).is_none());
    }

    #[test]
    fn update_does_not_mutate_input() {
        let before = wizard();
        let after = before
            .update_step_data(Step::Two, payload(json!({"x": true})))
            .unwrap();
        assert!(before.data().is_empty());
        assert_ne!(before, after);
    }

    #[test]
    fn update_same_payload_twice_is_idempotent() {
        let p = payload(json!({"email": "ana@example.com", "phone": "514-555-0100"}));
        let once = wizard().update_step_data(Step::One, p.clone()).unwrap();
        let twice = once.update_step_data(Step::One, p).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn update_unknown_step_is_refused() {
        let w = WizardState::new(vec![Step::One, Step::Two]).unwrap();
        let err = w.update_step_data(Step::Four, StepPayload::new()).unwrap_err();
        assert_eq!(
            err,
            WizardError::UnknownStep {
                step: "four".to_string()
            }
        );
    }

    // ── jump_to ─────────────────────────────────────────────────────

    #[test]
    fn jump_to_bypasses_gating() {
        let w = wizard().jump_to(3).unwrap();
        assert_eq!(w.current_step(), Step::Four);
        assert!(w.is_last());
    }

    #[test]
    fn jump_out_of_range_is_refused() {
        let w = wizard();
        assert_eq!(w.jump_to(4), Err(WizardError::OutOfRange { index: 4, len: 4 }));
        assert_eq!(w.current_index(), 0);
    }

    // ── lookups ─────────────────────────────────────────────────────

    #[test]
    fn lookups_by_name_and_position() {
        let w = wizard();
        assert_eq!(w.step_named("three"), Some(Step::Three));
        assert_eq!(w.step_named("five"), None);
        assert_eq!(w.index_of(Step::Four), Some(3));
        assert_eq!(w.step_count(), 4);
    }

    // ── Serialization ───────────────────────────────────────────────

    #[test]
    fn serde_roundtrip_keeps_cursor_and_data() {
        let w = wizard()
            .update_step_data(Step::Two, payload(json!({"k": "v"})))
            .unwrap()
            .jump_to(2)
            .unwrap();
        let json = serde_json::to_string(&w).unwrap();
        let parsed: WizardState<Step> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, w);
    }

    #[test]
    fn deserialize_rejects_out_of_range_cursor() {
        let json = r#"{"steps":["one","two"],"current_index":2,"data":{}}"#;
        let err = serde_json::from_str::<WizardState<Step>>(json).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn deserialize_rejects_data_for_foreign_step() {
        let json = r#"{"steps":["one","two"],"current_index":0,"data":{"four":{}}}"#;
        let err = serde_json::from_str::<WizardState<Step>>(json).unwrap_err();
        assert!(err.to_string().contains("unknown step four"));
    }

    #[test]
    fn deserialize_rejects_empty_steps() {
        let json = r#"{"steps":[],"current_index":0}"#;
        assert!(serde_json::from_str::<WizardState<Step>>(json).is_err());
    }
}
