//! Topology demo cases: declare constraints, reserve a topology, and
//! exercise the resolved nodes.

use crate::topo::{demo_constraints, DemoNode, DemoResolver};
use stairway_core::prelude::*;
use stairway_topology::{AgentKind, Industry, Resolver, Topology, TopologyConstraint};

/// A case whose reserve phase resolves seeded constraints into a demo
/// topology, and whose test phase extracts a property from every node.
pub struct TopoCase {
    name: &'static str,
    description: &'static str,
    seeds: Vec<(String, String, String)>,
    agent: AgentKind,
    topology: Option<Topology<DemoNode>>,
}

impl TopoCase {
    #[must_use]
    pub fn one_node(agent: AgentKind) -> Self {
        Self {
            name: "OneNodeTopoCase",
            description: "Single-node topology instantiation",
            seeds: vec![seed("A", "a", "1")],
            agent,
            topology: None,
        }
    }

    #[must_use]
    pub fn three_node(agent: AgentKind) -> Self {
        Self {
            name: "ThreeNodeTopoCase",
            description: "Three-node topology instantiation",
            seeds: vec![seed("A", "a", "1"), seed("A", "a", "2"), seed("B", "c", "3")],
            agent,
            topology: None,
        }
    }

    /// Analog for passing a version and build number in from the CLI.
    #[must_use]
    pub fn parameterized(uppercase: &str, lowercase: &str, number: &str, agent: AgentKind) -> Self {
        Self {
            name: "CliConstraintTopoCase",
            description: "CLI-based parameter topology instantiation",
            seeds: vec![seed(uppercase, lowercase, number)],
            agent,
            topology: None,
        }
    }

    fn declare(&self) -> anyhow::Result<TopologyConstraint> {
        let mut declared = TopologyConstraint::new();
        for (uppercase, lowercase, number) in &self.seeds {
            let constraints = demo_constraints(uppercase, lowercase, number, self.agent)?;
            declared.add_resource(format!("{uppercase}{lowercase}{number}"), constraints);
        }
        Ok(declared)
    }
}

fn seed(uppercase: &str, lowercase: &str, number: &str) -> (String, String, String) {
    (uppercase.to_string(), lowercase.to_string(), number.to_string())
}

impl Case for TopoCase {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn reserve(&mut self, _ctx: &RunContext) -> anyhow::Result<()> {
        let declared = self.declare()?;
        self.topology = Some(DemoResolver.resolve(&declared)?);
        Ok(())
    }

    fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let topology = self
            .topology
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("topology was not reserved"))?;

        for (_resource, node) in topology.iter() {
            let step = Step::new("Property extracted from resolved topology node");
            stairs.step(step, |step| {
                let factory = node.industry().make_namer_factory();
                let namer = factory.make_namer(node.industry().agency())?;
                step.resolve(State::Pass, format!("Demo node name: {}", namer.name()));
                Ok(())
            })?;
        }
        Ok(())
    }

    fn release(&mut self, _ctx: &RunContext) -> anyhow::Result<()> {
        self.topology = None;
        Ok(())
    }
}

/// All topology demo cases under one suite.
#[must_use]
pub fn topology_suite(
    uppercase: &str,
    lowercase: &str,
    number: &str,
    agent: AgentKind,
) -> Suite {
    Suite::new("AllToposSuite", "All topology demo suites and cases")
        .with_case(TopoCase::one_node(agent))
        .with_case(TopoCase::three_node(agent))
        .with_case(TopoCase::parameterized(uppercase, lowercase, number, agent))
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
    fn one_node_case_reserves_and_passes() {
        let ctx = test_ctx();
        let mut runner = TopoCase::one_node(AgentKind::Native).runner();
        runner.execute(&ctx).unwrap();
        assert_eq!(runner.result().state(), State::Pass);
        assert_eq!(runner.result().children().len(), 1);
        assert!(runner
            .result()
            .outcome()
            .message
            .contains("Demo node name: Aa1"));
        // release returned the topology
        assert!(runner.case().topology.is_none());
    }

    #[test]
    fn three_node_case_exercises_every_node() {
        let ctx = test_ctx();
        let mut runner = TopoCase::three_node(AgentKind::Native).runner();
        runner.execute(&ctx).unwrap();
        assert_eq!(runner.result().state(), State::Pass);
        assert_eq!(runner.result().children().len(), 3);
    }

    #[test]
    fn unsatisfiable_seed_propagates_from_reserve() {
        let ctx = test_ctx();
        // valid constraint values, but no node constructor matches
        let mut runner = TopoCase::parameterized("C", "b", "2", AgentKind::Native).runner();
        let fault = runner.execute(&ctx).unwrap_err();
        assert!(fault.to_string().contains("no resource satisfies"));
        // nothing after reserve ran
        assert_eq!(runner.result().state(), State::Untested);
    }

    #[test]
    fn topology_suite_runs_all_three_cases() {
        let ctx = test_ctx();
        let mut suite = topology_suite("A", "a", "1", AgentKind::Native);
        suite.execute(&ctx).unwrap();
        assert_eq!(suite.result().children().len(), 3);
        assert_eq!(suite.result().state(), State::Pass);
    }
}
