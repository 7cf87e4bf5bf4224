//! The severity-ordered outcome state model.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Final (or in-flight) disposition of a testable.
///
/// Variants are declared worst first, so the derived ordering *is* the
/// severity ordering: a lower state is a worse state. Aggregation relies on
/// this, nothing relies on the discriminant values themselves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    /// A verification plainly failed
    Fail,
    /// The outcome fell outside the step's expectation set
    Unexpected,
    /// Passed, but marginally (performance, known issues)
    Marginal,
    /// Abnormal end; usually a harness problem, not a product one
    Abend,
    /// Tested but the result could not be determined
    Unknown,
    /// The outcome matched a declared non-pass expectation
    Expected,
    /// A verification plainly passed
    Pass,
    /// The verification does not apply to this configuration
    Inapplicable,
    /// Transient results were discarded between retries
    Reset,
    /// Not yet tested
    Untested,
}

impl State {
    /// All states, worst first.
    pub const ALL: [State; 10] = [
        State::Fail,
        State::Unexpected,
        State::Marginal,
        State::Abend,
        State::Unknown,
        State::Expected,
        State::Pass,
        State::Inapplicable,
        State::Reset,
        State::Untested,
    ];

    /// States at or worse than [`State::Abend`]; these trigger the
    /// failure-response policy.
    pub const BAD_STATES: [State; 4] = [
        State::Fail,
        State::Unexpected,
        State::Marginal,
        State::Abend,
    ];

    /// Whether this state is failure-worthy.
    #[inline]
    #[must_use]
    pub fn is_bad(&self) -> bool {
        *self <= State::Abend
    }

    /// Upper-case name, matching the textual form used in transcripts.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            State::Fail => "FAIL",
            State::Unexpected => "UNEXPECTED",
            State::Marginal => "MARGINAL",
            State::Abend => "ABEND",
            State::Unknown => "UNKNOWN",
            State::Expected => "EXPECTED",
            State::Pass => "PASS",
            State::Inapplicable => "INAPPLICABLE",
            State::Reset => "RESET",
            State::Untested => "UNTESTED",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .iter()
            .copied()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::InvalidState(s.to_string()))
    }
}
