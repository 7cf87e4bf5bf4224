//! Demo suite compositions, from single-case to multi-depth.

use crate::report_cases::{AllStatesCase, ExpectationCase, FlightCase, SingleStateCase};
use stairway_core::{State, Suite};

/// One case per interesting state.
#[must_use]
pub fn multi_case_suite() -> Suite {
    Suite::new("MultiCaseSuite", "All demo cases")
        .with_case(SingleStateCase::new(State::Fail))
        .with_case(SingleStateCase::new(State::Abend))
        .with_case(SingleStateCase::new(State::Expected))
        .with_case(SingleStateCase::new(State::Unknown))
        .with_case(SingleStateCase::new(State::Untested))
        .with_case(SingleStateCase::new(State::Unexpected))
        .with_case(SingleStateCase::new(State::Inapplicable))
}

/// The all-states sampler on its own.
#[must_use]
pub fn states_suite() -> Suite {
    Suite::new("StatesSuite", "Sampling of all step states")
        .with_case(AllStatesCase::new(0))
}

#[must_use]
pub fn single_case_suite() -> Suite {
    Suite::new("SingleCaseSuite", "Suite containing single case")
        .with_case(SingleStateCase::new(State::Marginal))
}

/// One nested suite and one direct case.
#[must_use]
pub fn mixed_suite() -> Suite {
    Suite::new("MixedSuiteAndCaseSuite", "One suite & one case")
        .with(single_case_suite())
        .with_case(SingleStateCase::new(State::Pass))
}

#[must_use]
pub fn empty_suite() -> Suite {
    Suite::new("EmptySuite", "No subsuites or cases")
}

#[must_use]
pub fn unexpected_suite() -> Suite {
    Suite::new("UnexpectedSuite", "Unexpected variants")
        .with_case(ExpectationCase::unexpected_single())
        .with_case(ExpectationCase::unexpected_multiple())
        .with_case(ExpectationCase::unexpected_empty())
}

#[must_use]
pub fn expected_suite() -> Suite {
    Suite::new("ExpectedSuite", "Expected variants")
        .with_case(ExpectationCase::expected_pass_single())
        .with_case(ExpectationCase::expected_pass_multi())
        .with_case(ExpectationCase::expected_single_marginal())
        .with_case(ExpectationCase::expected_marginal_multi())
}

/// Both expectation suites under one roof.
#[must_use]
pub fn expectation_suite() -> Suite {
    Suite::new("ExpectationSuite", "Expectation assessment variants")
        .with(unexpected_suite())
        .with(expected_suite())
}

#[must_use]
pub fn flight_suite() -> Suite {
    Suite::new("FlightSuite", "Flight variants")
        .with_case(FlightCase::named(3))
        .with_case(FlightCase::unnamed(3))
        .with_case(FlightCase::nested(3))
}

/// Multi-depth composition of everything above.
#[must_use]
pub fn all_suites() -> Suite {
    Suite::new("AllSuitesSuite", "Multi-depth suites and cases")
        .with(single_case_suite())
        .with(multi_case_suite())
        .with(mixed_suite())
        .with(empty_suite())
        .with(unexpected_suite())
        .with(expected_suite())
        .with(flight_suite())
}
