//! Report demo cases: one per state, expectation variants, and flights.

use stairway_core::prelude::*;

/// One case per outcome state: a single step seeded with that state and
/// left for the default pass-expectation to carry through.
pub struct SingleStateCase {
    state: State,
}

impl SingleStateCase {
    #[must_use]
    pub fn new(state: State) -> Self {
        Self { state }
    }

    fn title(&self) -> &'static str {
        match self.state {
            State::Fail => "Fail",
            State::Unexpected => "Unexpected",
            State::Marginal => "Marginal",
            State::Abend => "Abend",
            State::Unknown => "Unknown",
            State::Expected => "Expected",
            State::Pass => "Pass",
            State::Inapplicable => "Inapplicable",
            State::Reset => "Reset",
            State::Untested => "Untested",
        }
    }
}

impl Case for SingleStateCase {
    fn name(&self) -> &str {
        match self.state {
            State::Fail => "FailingCase",
            State::Unexpected => "UnexpectedCase",
            State::Marginal => "MarginalCase",
            State::Abend => "AbendCase",
            State::Unknown => "UnknownCase",
            State::Expected => "ExpectedCase",
            State::Pass => "PassingCase",
            State::Inapplicable => "InapplicableCase",
            State::Reset => "ResetCase",
            State::Untested => "UntestedCase",
        }
    }

    fn description(&self) -> &str {
        match self.state {
            State::Fail => "Failure demo",
            State::Unexpected => "Unexpected demo",
            State::Marginal => "Marginal demo",
            State::Abend => "Abend demo",
            State::Unknown => "Unknown demo",
            State::Expected => "Expected demo",
            State::Pass => "Passing demo",
            State::Inapplicable => "Inapplicable demo",
            State::Reset => "Reset demo",
            State::Untested => "Untested demo",
        }
    }

    fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let title = self.title();
        let step = Step::new(format!("{title} step description"))
            .with_state(self.state)
            .with_message(format!("{title} step message"));
        stairs.step(step, |_step| Ok(()))
    }
}

/// A sampling of every step state in one case, exercised in a rotated
/// order so the transcript interleaving is not simply severity order.
pub struct AllStatesCase {
    rotation: usize,
    steps: Vec<(String, State, String)>,
}

impl AllStatesCase {
    /// `rotation` shifts the starting point of the sequence; runs stay
    /// deterministic for a given value.
    #[must_use]
    pub fn new(rotation: usize) -> Self {
        Self {
            rotation,
            steps: Vec::new(),
        }
    }
}

impl Case for AllStatesCase {
    fn name(&self) -> &str {
        "AllStatesCase"
    }

    fn description(&self) -> &str {
        "Sampling of all step states"
    }

    fn prepare(&mut self, _stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let sampled = [
            State::Fail,
            State::Abend,
            State::Expected,
            State::Marginal,
            State::Pass,
            State::Unknown,
            State::Untested,
            State::Unexpected,
            State::Inapplicable,
        ];
        let title = |state: State| {
            let name = state.name();
            format!("{}{}", &name[..1], name[1..].to_lowercase())
        };
        self.steps = sampled
            .iter()
            .map(|state| {
                (
                    format!("{} step description", title(*state)),
                    *state,
                    format!("{} step message", title(*state)),
                )
            })
            .collect();
        if !self.steps.is_empty() {
            let len = self.steps.len();
            self.steps.rotate_left(self.rotation % len);
        }
        Ok(())
    }

    fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        for (description, state, message) in std::mem::take(&mut self.steps) {
            let step = Step::new(description)
                .with_state(state)
                .with_message(message)
                .with_response(Response::Proceed);
            stairs.step(step, |_step| Ok(()))?;
        }
        Ok(())
    }
}

/// Expectation assessment variants: the body drives the step to a final
/// state that does or does not satisfy the declared expectations.
pub struct ExpectationCase {
    name: &'static str,
    description: &'static str,
    step_title: &'static str,
    expected: Vec<State>,
    actual: State,
}

impl ExpectationCase {
    #[must_use]
    pub fn unexpected_single() -> Self {
        Self {
            name: "UnexpectedSingleCase",
            description: "Unexpected pass with single expectation",
            step_title: "Unexpected",
            expected: vec![State::Marginal],
            actual: State::Pass,
        }
    }

    #[must_use]
    pub fn unexpected_multiple() -> Self {
        Self {
            name: "UnexpectedMultipleCase",
            description: "Unexpected marginal with multi expectation",
            step_title: "Unexpected",
            expected: vec![State::Fail, State::Abend],
            actual: State::Marginal,
        }
    }

    #[must_use]
    pub fn unexpected_empty() -> Self {
        Self {
            name: "UnexpectedEmptyCase",
            description: "Unexpected marginal when no expectation",
            step_title: "Unexpected",
            expected: vec![],
            actual: State::Marginal,
        }
    }

    #[must_use]
    pub fn expected_pass_single() -> Self {
        Self {
            name: "ExpectedPassSingleCase",
            description: "Expected pass with single expectation",
            step_title: "Pass",
            expected: vec![State::Pass],
            actual: State::Pass,
        }
    }

    #[must_use]
    pub fn expected_pass_multi() -> Self {
        Self {
            name: "ExpectedPassMultiCase",
            description: "Expected pass with multiple expectations",
            step_title: "Pass",
            expected: vec![State::Pass, State::Marginal],
            actual: State::Pass,
        }
    }

    #[must_use]
    pub fn expected_single_marginal() -> Self {
        Self {
            name: "ExpectedSingleMarginalCase",
            description: "Expected marginal with single expectation",
            step_title: "Marginal",
            expected: vec![State::Marginal],
            actual: State::Marginal,
        }
    }

    #[must_use]
    pub fn expected_marginal_multi() -> Self {
        Self {
            name: "ExpectedMarginalMultiCase",
            description: "Expected marginal with multiple expectations",
            step_title: "Marginal",
            expected: vec![State::Marginal, State::Pass],
            actual: State::Marginal,
        }
    }
}

impl Case for ExpectationCase {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let actual = self.actual;
        let step = Step::new(format!("{} step description", self.step_title))
            .with_message(format!("{} step message", self.step_title))
            .expecting(Expectations::new(self.expected.clone()))
            .with_response(Response::Proceed);
        stairs.step(step, |step| {
            step.outcome_mut().set_state(actual);
            Ok(())
        })
    }
}

/// Flight shapes: named, unnamed, and nested flights of passing steps.
pub struct FlightCase {
    name: &'static str,
    description: &'static str,
    loops: usize,
    nested: bool,
    named: bool,
}

impl FlightCase {
    #[must_use]
    pub fn named(loops: usize) -> Self {
        Self {
            name: "NamedFlightCase",
            description: "Named flight demo",
            loops,
            nested: false,
            named: true,
        }
    }

    #[must_use]
    pub fn unnamed(loops: usize) -> Self {
        Self {
            name: "UnnamedFlightCase",
            description: "Unnamed flight demo",
            loops,
            nested: false,
            named: false,
        }
    }

    #[must_use]
    pub fn nested(loops: usize) -> Self {
        Self {
            name: "NestedFlightCase",
            description: "Nested flight demo",
            loops,
            nested: true,
            named: true,
        }
    }

    fn pass_step(index: usize) -> Step {
        Step::new(format!("Flight step #{index}")).with_message("scripted pass")
    }
}

impl Case for FlightCase {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let loops = self.loops;
        if self.nested {
            return stairs.flight(Some(&format!("Outer passes * {loops}")), None, |outer| {
                for outer_index in 0..loops {
                    outer.flight(
                        Some(&format!("Inner passes * {loops} #{outer_index}")),
                        None,
                        |inner| {
                            for inner_index in 0..loops {
                                inner.step(Self::pass_step(inner_index), |step| {
                                    step.outcome_mut().set_state(State::Pass);
                                    Ok(())
                                })?;
                            }
                            Ok(())
                        },
                    )?;
                }
                Ok(())
            });
        }

        let name = self.named.then(|| format!("Passes * {loops}"));
        stairs.flight(name.as_deref(), None, |flight| {
            for index in 0..loops {
                flight.step(Self::pass_step(index), |step| {
                    step.outcome_mut().set_state(State::Pass);
                    Ok(())
                })?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stairway_core::NoInspect;
    use stairway_report::{Level, Reporter};

    fn test_ctx() -> RunContext {
        let (reporter, _sink) = Reporter::capture(Level::Debug);
        let config = RunConfig {
            response: Response::Proceed,
            ..RunConfig::default()
        };
        RunContext::new(config, reporter).with_inspector(Box::new(NoInspect))
    }

    #[test]
    fn single_state_cases_land_on_their_state() {
        let ctx = test_ctx();
        for state in [State::Fail, State::Marginal, State::Pass, State::Inapplicable] {
            let mut runner = SingleStateCase::new(state).runner();
            runner.execute(&ctx).unwrap();
            assert_eq!(runner.result().state(), state);
        }
    }

    #[test]
    fn all_states_case_aggregates_to_fail() {
        let ctx = test_ctx();
        for rotation in 0..3 {
            let mut runner = AllStatesCase::new(rotation).runner();
            runner.execute(&ctx).unwrap();
            // FAIL is sampled, and first-worst-wins makes it the head
            assert_eq!(runner.result().state(), State::Fail);
            assert_eq!(runner.result().children().len(), 9);
        }
    }

    #[test]
    fn expectation_cases_assess_as_named() {
        let ctx = test_ctx();

        let expected = [
            (ExpectationCase::unexpected_single(), State::Unexpected),
            (ExpectationCase::unexpected_multiple(), State::Unexpected),
            (ExpectationCase::unexpected_empty(), State::Unexpected),
            (ExpectationCase::expected_pass_single(), State::Pass),
            (ExpectationCase::expected_pass_multi(), State::Expected),
            (ExpectationCase::expected_single_marginal(), State::Expected),
            (ExpectationCase::expected_marginal_multi(), State::Expected),
        ];
        for (case, final_state) in expected {
            let name = case.name;
            let mut runner = case.runner();
            runner.execute(&ctx).unwrap();
            assert_eq!(runner.result().state(), final_state, "{name}");
        }
    }

    #[test]
    fn nested_flights_report_one_unit() {
        let ctx = test_ctx();
        let mut runner = FlightCase::nested(3).runner();
        runner.execute(&ctx).unwrap();
        assert_eq!(runner.result().state(), State::Pass);
        // one outer flight recorded at case level
        assert_eq!(runner.result().children().len(), 1);
    }
}
