//! Atomic steps and expectation assessment.

use crate::policy::Response;
use crate::result::{Outcome, StepResult};
use crate::state::State;
use serde::{Deserialize, Serialize};

/// The states a step is permitted to end in.
///
/// Defaults to `[Pass]`. An explicitly empty set is legal: assessment then
/// takes the membership branch and the actual state can never be a member,
/// so the step always ends [`State::Unexpected`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectations(Vec<State>);

impl Expectations {
    #[must_use]
    pub fn new(states: Vec<State>) -> Self {
        Self(states)
    }

    #[must_use]
    pub fn single(state: State) -> Self {
        Self(vec![state])
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[State] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, state: State) -> bool {
        self.0.contains(&state)
    }

    /// Bracketed listing for assessment messages, e.g. `[PASS, MARGINAL]`.
    #[must_use]
    pub fn listing(&self) -> String {
        let names: Vec<&str> = self.0.iter().map(State::name).collect();
        format!("[{}]", names.join(", "))
    }
}

impl Default for Expectations {
    fn default() -> Self {
        Self(vec![State::Pass])
    }
}

impl From<Vec<State>> for Expectations {
    fn from(states: Vec<State>) -> Self {
        Self::new(states)
    }
}

impl From<State> for Expectations {
    fn from(state: State) -> Self {
        Self::single(state)
    }
}

/// A single atomic verification.
///
/// Steps are the building blocks all larger testables are formed from. A
/// step starts [`State::Untested`], its body drives the outcome, and on
/// scope exit [`Step::assess`] reconciles the raw outcome against the
/// expectation set before the result is recorded and reported.
#[derive(Debug, Clone)]
pub struct Step {
    outcome: Outcome,
    expected: Expectations,
    response: Response,
}

impl Step {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::untested(description),
            expected: Expectations::default(),
            response: Response::Halt,
        }
    }

    /// Seed the initial state (demos use this to showcase each state).
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.outcome.set_state(state);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.outcome.message = message.into();
        self
    }

    /// Declare the acceptable final states.
    #[must_use]
    pub fn expecting(mut self, expected: impl Into<Expectations>) -> Self {
        self.expected = expected.into();
        self
    }

    /// Step-specific failure response, overriding nothing by itself: the
    /// run-wide response still participates (see the stair scope).
    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = response;
        self
    }

    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[inline]
    pub fn outcome_mut(&mut self) -> &mut Outcome {
        &mut self.outcome
    }

    /// Set state and message in one go; the common body ending.
    pub fn resolve(&mut self, state: State, message: impl Into<String>) {
        self.outcome.set_state(state);
        self.outcome.message = message.into();
    }

    #[inline]
    #[must_use]
    pub fn response(&self) -> Response {
        self.response
    }

    #[inline]
    #[must_use]
    pub fn expected(&self) -> &Expectations {
        &self.expected
    }

    /// Reconcile the raw outcome against the expectation set.
    ///
    /// A single expectation of `Pass` is the default and needs no
    /// reassessment. A single non-`Pass` expectation reports the
    /// comparison either way. Any other count reports set membership.
    pub fn assess(&mut self) {
        let actual = self.outcome.state();
        match self.expected.as_slice() {
            [State::Pass] => {}
            [expected] => {
                if actual == *expected {
                    self.outcome.message = format!(
                        "actual {actual} == expected {expected}: {}",
                        self.outcome.message
                    );
                    self.outcome.set_state(State::Expected);
                } else {
                    self.outcome.message = format!(
                        "actual {actual} != expected {expected}: {}",
                        self.outcome.message
                    );
                    self.outcome.set_state(State::Unexpected);
                }
            }
            _ => {
                let listing = self.expected.listing();
                if self.expected.contains(actual) {
                    self.outcome.message = format!(
                        "actual {actual} in expected {listing}: {}",
                        self.outcome.message
                    );
                    self.outcome.set_state(State::Expected);
                } else {
                    self.outcome.message = format!(
                        "actual {actual} not in expected {listing}: {}",
                        self.outcome.message
                    );
                    self.outcome.set_state(State::Unexpected);
                }
            }
        }
    }

    /// Finish the step, yielding its recordable result.
    #[must_use]
    pub fn into_result(self) -> StepResult {
        StepResult::new(self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessed(raw: State, expected: Expectations) -> Step {
        let mut step = Step::new("check").with_state(raw).with_message("m").expecting(expected);
        step.assess();
        step
    }

    #[test]
    fn default_expectation_leaves_raw_state() {
        assert_eq!(assessed(State::Pass, Expectations::default()).outcome().state(), State::Pass);
        assert_eq!(assessed(State::Marginal, Expectations::default()).outcome().state(), State::Marginal);
        assert_eq!(assessed(State::Untested, Expectations::default()).outcome().state(), State::Untested);
    }

    #[test]
    fn explicit_single_pass_also_stands() {
        let step = assessed(State::Fail, Expectations::single(State::Pass));
        assert_eq!(step.outcome().state(), State::Fail);
        assert_eq!(step.outcome().message, "m");
    }

    #[test]
    fn single_nonpass_match_becomes_expected() {
        let step = assessed(State::Marginal, Expectations::single(State::Marginal));
        assert_eq!(step.outcome().state(), State::Expected);
        assert_eq!(step.outcome().message, "actual MARGINAL == expected MARGINAL: m");
    }

    #[test]
    fn single_nonpass_mismatch_becomes_unexpected() {
        let step = assessed(State::Fail, Expectations::single(State::Marginal));
        assert_eq!(step.outcome().state(), State::Unexpected);
        assert_eq!(step.outcome().message, "actual FAIL != expected MARGINAL: m");
    }

    #[test]
    fn multi_member_becomes_expected() {
        let step = assessed(
            State::Marginal,
            Expectations::new(vec![State::Pass, State::Marginal]),
        );
        assert_eq!(step.outcome().state(), State::Expected);
        assert_eq!(
            step.outcome().message,
            "actual MARGINAL in expected [PASS, MARGINAL]: m"
        );
    }

    #[test]
    fn multi_nonmember_becomes_unexpected() {
        let step = assessed(
            State::Fail,
            Expectations::new(vec![State::Pass, State::Marginal]),
        );
        assert_eq!(step.outcome().state(), State::Unexpected);
        assert_eq!(
            step.outcome().message,
            "actual FAIL not in expected [PASS, MARGINAL]: m"
        );
    }

    #[test]
    fn multi_pass_member_is_still_reassessed() {
        let step = assessed(
            State::Pass,
            Expectations::new(vec![State::Pass, State::Marginal]),
        );
        assert_eq!(step.outcome().state(), State::Expected);
    }

    #[test]
    fn empty_expectations_always_unexpected() {
        let step = assessed(State::Marginal, Expectations::new(vec![]));
        assert_eq!(step.outcome().state(), State::Unexpected);
        assert_eq!(step.outcome().message, "actual MARGINAL not in expected []: m");
    }
}
