//! # Wizard Navigation
//!
//! End-to-end walk through a four-step wizard, then property tests of the
//! navigation invariants over random operation sequences.

use belle_wizard::{StepId, StepPayload, WizardError, WizardState};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
enum Step {
    Profile,
    Salon,
    Pricing,
    Confirm,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StepId for Step {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Salon => "salon",
            Self::Pricing => "pricing",
            Self::Confirm => "confirm",
        }
    }
}

const STEPS: [Step; 4] = [Step::Profile, Step::Salon, Step::Pricing, Step::Confirm];

fn four_steps() -> WizardState<Step> {
    WizardState::new(STEPS.to_vec()).unwrap()
}

fn payload(value: serde_json::Value) -> StepPayload {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn four_step_walkthrough() {
    // Step 1 is valid, so we reach step 2.
    let w = four_steps().advance(true).unwrap();
    assert_eq!(w.current_index(), 1);

    // Step 2 is invalid: advance is blocked and the UI stays on step 2.
    let err = w.advance(false).unwrap_err();
    assert_eq!(err, WizardError::Validation { step: "salon".into() });
    assert_eq!(w.current_index(), 1);

    // Marked valid, advance reaches step 3.
    let w = w.advance(true).unwrap();
    assert_eq!(w.current_index(), 2);

    // Two retreats return to step 1.
    let w = w.retreat().retreat();
    assert_eq!(w.current_index(), 0);

    // Data entered on step 1 and step 3 both survive.
    let w = w
        .update_step_data(Step::Profile, payload(json!({"name": "Studio Lumière"})))
        .unwrap()
        .update_step_data(Step::Pricing, payload(json!({"haircut": 45})))
        .unwrap();
    let data = w.into_data();
    assert_eq!(data[&Step::Profile]["name"], "Studio Lumière");
    assert_eq!(data[&Step::Pricing]["haircut"], 45);
}

#[derive(Debug, Clone)]
enum Op {
    Advance(bool),
    Retreat,
    Jump(usize),
    Update(usize, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Advance),
        Just(Op::Retreat),
        (0usize..6).prop_map(Op::Jump),
        (0usize..4, any::<u8>()).prop_map(|(i, v)| Op::Update(i, v)),
    ]
}

fn apply(w: &WizardState<Step>, op: &Op) -> Result<WizardState<Step>, WizardError> {
    match op {
        Op::Advance(valid) => w.advance(*valid),
        Op::Retreat => Ok(w.retreat()),
        Op::Jump(i) => w.jump_to(*i),
        Op::Update(i, v) => w.update_step_data(STEPS[*i], payload(json!({ "v": v }))),
    }
}

proptest! {
    /// The cursor never leaves `0..N`, whatever the caller does.
    #[test]
    fn cursor_stays_in_range(ops in prop::collection::vec(op(), 0..40)) {
        let mut w = four_steps();
        for op in &ops {
            if let Ok(next) = apply(&w, op) {
                w = next;
            }
            prop_assert!(w.current_index() < w.step_count());
        }
    }

    /// Invalid advance is always refused, from any position.
    #[test]
    fn invalid_advance_never_moves(start in 0usize..4) {
        let w = four_steps().jump_to(start).unwrap();
        prop_assert!(w.advance(false).is_err());
        prop_assert_eq!(w.current_index(), start);
    }

    /// Valid advance moves by exactly one, saturating at the last step.
    #[test]
    fn valid_advance_moves_one(start in 0usize..4) {
        let w = four_steps().jump_to(start).unwrap();
        let next = w.advance(true).unwrap();
        prop_assert_eq!(next.current_index(), (start + 1).min(3));
    }

    /// Retreat moves back by exactly one, stopping at zero.
    #[test]
    fn retreat_moves_one(start in 0usize..4) {
        let w = four_steps().jump_to(start).unwrap();
        prop_assert_eq!(w.retreat().current_index(), start.saturating_sub(1));
    }

    /// Out-of-range jumps are refused with the wizard length attached.
    #[test]
    fn out_of_range_jump_refused(target in 4usize..1000) {
        let w = four_steps();
        prop_assert_eq!(w.jump_to(target), Err(WizardError::OutOfRange { index: target, len: 4 }));
    }

    /// Data only ever grows: no operation removes a step's entry.
    #[test]
    fn data_is_monotonic(ops in prop::collection::vec(op(), 0..40)) {
        let mut w = four_steps();
        for op in &ops {
            if let Ok(next) = apply(&w, op) {
                for step in w.data().keys() {
                    prop_assert!(next.data().contains_key(step));
                }
                w = next;
            }
        }
    }

    /// Applying the same payload twice equals applying it once.
    #[test]
    fn update_is_idempotent(i in 0usize..4, v in any::<u8>()) {
        let p = payload(json!({ "v": v, "label": "same" }));
        let once = four_steps().update_step_data(STEPS[i], p.clone()).unwrap();
        let twice = once.update_step_data(STEPS[i], p).unwrap();
        prop_assert_eq!(once, twice);
    }
}
