//! Full demo runs asserted against their captured transcripts.

use pretty_assertions::assert_eq;
use stairway_core::prelude::*;
use stairway_core::NoInspect;
use stairway_demo::{suites, topo_cases};
use stairway_report::{CaptureSink, Level, Reporter};
use stairway_topology::AgentKind;
use std::sync::Arc;

fn capture_ctx() -> (RunContext, Arc<CaptureSink>) {
    let (reporter, sink) = Reporter::capture(Level::Info);
    let config = RunConfig {
        response: Response::Proceed,
        ..RunConfig::default()
    };
    let ctx = RunContext::new(config, reporter).with_inspector(Box::new(NoInspect));
    (ctx, sink)
}

#[test]
fn all_suites_transcript_has_full_skeleton() {
    let (ctx, sink) = capture_ctx();
    let mut suite = suites::all_suites();
    suite.execute(&ctx).unwrap();

    let transcript = sink.contents();

    // the top-level banner and headers
    assert!(transcript.contains("AllSuitesSuite"));
    assert!(transcript.contains("Description: Multi-depth suites and cases"));
    assert!(transcript.contains("Parameters: {}"));

    // steps were reported as they completed
    assert!(transcript.contains("STEP: Fail step description | FAIL | Fail step message"));
    assert!(transcript.contains("STEP: Marginal step description | MARGINAL |"));

    // expectation annotations made it into the step lines
    assert!(transcript.contains("actual PASS != expected MARGINAL"));
    assert!(transcript.contains("actual MARGINAL not in expected [FAIL, ABEND]"));

    // flight reporting: demarcation plus the one-line flight summary
    assert!(transcript.contains("'Passes * 3' Flight"));
    assert!(transcript.contains("FLIGHT Unnamed"));

    // the suite report renders its children indented one level
    assert!(transcript.contains("SUITE AllSuitesSuite"));
    assert!(transcript.contains("    SUITE MultiCaseSuite"));

    // the first worst child heads the whole tree
    assert_eq!(suite.result().state(), State::Fail);
}

#[test]
fn empty_suite_reports_untested() {
    let (ctx, sink) = capture_ctx();
    let mut suite = suites::empty_suite();
    suite.execute(&ctx).unwrap();
    assert_eq!(suite.result().state(), State::Untested);
    assert!(sink.contents().contains("SUITE EmptySuite"));
}

#[test]
fn topology_suite_transcript_names_resolved_nodes() {
    let (ctx, sink) = capture_ctx();
    let mut suite = topo_cases::topology_suite("A", "a", "1", AgentKind::Native);
    suite.execute(&ctx).unwrap();

    let transcript = sink.contents();
    for node in ["Aa1", "Aa2", "Bc3"] {
        assert!(
            transcript.contains(&format!("Demo node name: {node}")),
            "missing node {node}"
        );
    }
    // every case walked all seven phases
    assert!(transcript.contains("OneNodeTopoCase / reserve phase"));
    assert!(transcript.contains("ThreeNodeTopoCase / release phase"));
    assert_eq!(suite.result().state(), State::Pass);
}

#[test]
fn json_summary_round_trips() {
    let (ctx, _sink) = capture_ctx();
    let mut suite = suites::expected_suite();
    suite.execute(&ctx).unwrap();

    let rendered = serde_json::to_string_pretty(suite.result()).unwrap();
    assert!(rendered.contains("\"EXPECTED\""));
    assert!(rendered.contains("ExpectedPassMultiCase"));
}
