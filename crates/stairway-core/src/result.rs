//! Result types and the aggregation rule.
//!
//! A result is a distinct (if dependent) entity from the testable that
//! produced it: it can be read at any point during a run but matters most
//! at completion. Leaf results hold a single [`Outcome`]; aggregate results
//! additionally own the ordered child results recorded into them, and keep
//! their own outcome equal to the first-worst child seen so far.

use crate::state::State;
use serde::{Deserialize, Serialize};
use stairway_report::{Level, Reporter, Visibility};

/// The `(description, state, message)` payload every result carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// Short, meaningful explanation of what was verified
    pub description: String,
    state: State,
    /// Elaboration of the state
    pub message: String,
}

impl Outcome {
    #[must_use]
    pub fn new(description: impl Into<String>, state: State, message: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            state,
            message: message.into(),
        }
    }

    /// Fresh outcome in the initial [`State::Untested`] state.
    #[must_use]
    pub fn untested(description: impl Into<String>) -> Self {
        Self::new(description, State::Untested, "")
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Single mutation point for the state. The enum keeps values inside
    /// the enumeration; text is validated by `State::from_str` instead.
    #[inline]
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }
}

/// Kind of aggregate, used only for rendering and recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultKind {
    Flight,
    Case,
    Suite,
}

impl ResultKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::Flight => "FLIGHT",
            ResultKind::Case => "CASE",
            ResultKind::Suite => "SUITE",
        }
    }
}

/// Outcome of a single atomic step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    outcome: Outcome,
}

impl StepResult {
    #[must_use]
    pub fn new(outcome: Outcome) -> Self {
        Self { outcome }
    }

    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> State {
        self.outcome.state()
    }

    /// Render the step's transcript line.
    pub fn report(&self, reporter: &Reporter, indent: usize) {
        let line = format!(
            "STEP: {} | {} | {}",
            self.outcome.description,
            self.outcome.state(),
            self.outcome.message
        );
        reporter.emit(
            &Reporter::indent(&line, indent),
            Some(Level::Info),
            Visibility::Minor,
        );
    }
}

/// Outcome of a flight, case, or suite, with its recorded children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    kind: ResultKind,
    name: String,
    outcome: Outcome,
    children: Vec<TestResult>,
}

impl AggregateResult {
    /// Fresh aggregate in the [`State::Untested`] state.
    #[must_use]
    pub fn new(kind: ResultKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            outcome: Outcome::untested(description),
            children: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> State {
        self.outcome.state()
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[TestResult] {
        &self.children
    }

    /// Append a child and maintain the first-worst-wins invariant: only a
    /// strictly worse child replaces the aggregate's own outcome, so the
    /// first occurrence of the worst severity is the one that sticks.
    pub fn record(&mut self, child: TestResult) {
        if child.state() < self.outcome.state() {
            self.outcome = child.outcome().clone();
        }
        self.children.push(child);
    }

    /// Discard transient children between retries of the same testable.
    /// The aggregate's name (its identity) is untouched.
    pub fn reset(&mut self) {
        self.children.clear();
        self.outcome = Outcome::new("Reset", State::Reset, "Reset");
    }

    /// Force the aggregate into [`State::Abend`] carrying the fault text.
    /// Used by the case lifecycle when a protected phase faults; the
    /// description is left as-is so the case stays identifiable.
    pub fn force_abend(&mut self, message: impl Into<String>) {
        self.outcome.set_state(State::Abend);
        self.outcome.message = message.into();
    }

    /// Render the aggregate's line and, depending on kind, its children.
    ///
    /// Suites render one level only regardless of `recurse`: anything
    /// below case granularity was already reported as it completed.
    pub fn report(&self, reporter: &Reporter, recurse: bool, indent: usize) {
        let line = format!(
            "{} {}: {} | {} | {}",
            self.kind.label(),
            self.name,
            self.outcome.description,
            self.outcome.state(),
            self.outcome.message
        );
        reporter.emit(
            &Reporter::indent(&line, indent),
            Some(Level::Info),
            Visibility::Minor,
        );
        match self.kind {
            ResultKind::Suite => {
                for child in &self.children {
                    child.report(reporter, false, indent + 1);
                }
            }
            ResultKind::Flight | ResultKind::Case => {
                if recurse {
                    for child in &self.children {
                        child.report(reporter, true, indent + 1);
                    }
                }
            }
        }
    }
}

/// A recorded result: the unit an aggregate's child sequence is made of.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TestResult {
    Step(StepResult),
    Aggregate(AggregateResult),
}

impl TestResult {
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        match self {
            TestResult::Step(step) => step.outcome(),
            TestResult::Aggregate(aggregate) => aggregate.outcome(),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> State {
        self.outcome().state()
    }

    pub fn report(&self, reporter: &Reporter, recurse: bool, indent: usize) {
        match self {
            TestResult::Step(step) => step.report(reporter, indent),
            TestResult::Aggregate(aggregate) => aggregate.report(reporter, recurse, indent),
        }
    }
}

/// Capability: can be recorded into a parent aggregator.
pub trait Recordable {
    fn into_record(self) -> TestResult;
}

impl Recordable for StepResult {
    fn into_record(self) -> TestResult {
        TestResult::Step(self)
    }
}

impl Recordable for AggregateResult {
    fn into_record(self) -> TestResult {
        TestResult::Aggregate(self)
    }
}

impl Recordable for TestResult {
    fn into_record(self) -> TestResult {
        self
    }
}

/// Capability: owns an aggregate result and can absorb child results.
pub trait Aggregator {
    fn aggregate(&self) -> &AggregateResult;
    fn aggregate_mut(&mut self) -> &mut AggregateResult;

    fn record(&mut self, child: impl Recordable)
    where
        Self: Sized,
    {
        self.aggregate_mut().record(child.into_record());
    }
}

impl Aggregator for AggregateResult {
    fn aggregate(&self) -> &AggregateResult {
        self
    }

    fn aggregate_mut(&mut self) -> &mut AggregateResult {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn step(description: &str, state: State, message: &str) -> TestResult {
        TestResult::Step(StepResult::new(Outcome::new(description, state, message)))
    }

    #[test]
    fn fresh_aggregate_is_untested() {
        let aggregate = AggregateResult::new(ResultKind::Case, "case", "case (demo)");
        assert_eq!(aggregate.state(), State::Untested);
        assert!(aggregate.children().is_empty());
    }

    #[test]
    fn record_keeps_first_worst() {
        let mut aggregate = AggregateResult::new(ResultKind::Flight, "flight", "flight");
        aggregate.record(step("first pass", State::Pass, "ok"));
        assert_eq!(aggregate.state(), State::Pass);

        aggregate.record(step("first fail", State::Fail, "broke"));
        assert_eq!(aggregate.state(), State::Fail);
        assert_eq!(aggregate.outcome().description, "first fail");

        // an equally bad later child does not displace the first one
        aggregate.record(step("second fail", State::Fail, "also broke"));
        assert_eq!(aggregate.outcome().description, "first fail");
        assert_eq!(aggregate.outcome().message, "broke");

        // a better child never improves the aggregate
        aggregate.record(step("late pass", State::Pass, "ok"));
        assert_eq!(aggregate.state(), State::Fail);
        assert_eq!(aggregate.children().len(), 4);
    }

    #[test]
    fn reset_clears_children_but_not_identity() {
        let mut aggregate = AggregateResult::new(ResultKind::Case, "stress", "stress (loop)");
        aggregate.record(step("s", State::Fail, "m"));
        aggregate.reset();
        assert!(aggregate.children().is_empty());
        assert_eq!(aggregate.state(), State::Reset);
        assert_eq!(aggregate.outcome().description, "Reset");
        assert_eq!(aggregate.name(), "stress");
    }

    #[test]
    fn force_abend_keeps_description() {
        let mut aggregate = AggregateResult::new(ResultKind::Case, "case", "case (demo)");
        aggregate.force_abend("boom\n  caused by: io error");
        assert_eq!(aggregate.state(), State::Abend);
        assert_eq!(aggregate.outcome().description, "case (demo)");
        assert!(aggregate.outcome().message.contains("caused by"));
    }

    #[test]
    fn suite_report_stops_at_case_granularity() {
        let (reporter, sink) = Reporter::capture(Level::Debug);

        let mut case = AggregateResult::new(ResultKind::Case, "inner", "inner (demo)");
        case.record(step("hidden step", State::Pass, "ok"));

        let mut suite = AggregateResult::new(ResultKind::Suite, "outer", "outer (demo)");
        suite.record(case.into_record());
        suite.report(&reporter, false, 0);

        let contents = sink.contents();
        assert!(contents.contains("SUITE outer"));
        assert!(contents.contains("    CASE inner"));
        assert!(!contents.contains("hidden step"));
    }

    #[test]
    fn case_report_recurses_through_flights() {
        let (reporter, sink) = Reporter::capture(Level::Debug);

        let mut flight = AggregateResult::new(ResultKind::Flight, "loop", "loop");
        flight.record(step("leaf", State::Pass, "ok"));

        let mut case = AggregateResult::new(ResultKind::Case, "case", "case (demo)");
        case.record(flight.into_record());
        case.report(&reporter, true, 0);

        let contents = sink.contents();
        assert!(contents.contains("CASE case"));
        assert!(contents.contains("    FLIGHT loop"));
        assert!(contents.contains("        STEP: leaf"));
    }
}
