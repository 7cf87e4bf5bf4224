//! Demo scenarios for the stairway harness.
//!
//! Impractical on purpose: each case exists to showcase one engine
//! behavior — a state, an expectation variant, a flight shape, or a
//! topology resolution — as an analogy for meaningful usage.

pub mod report_cases;
pub mod suites;
pub mod topo;
pub mod topo_cases;

pub use report_cases::{AllStatesCase, ExpectationCase, FlightCase, SingleStateCase};
pub use suites::{
    all_suites, empty_suite, expectation_suite, expected_suite, flight_suite, mixed_suite,
    multi_case_suite, single_case_suite, states_suite, unexpected_suite,
};
pub use topo::{DemoNode, DemoResolver, demo_schema};
pub use topo_cases::{topology_suite, TopoCase};
