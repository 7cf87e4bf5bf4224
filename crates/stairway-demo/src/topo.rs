//! Demo topology: a closed constraint schema and a deterministic resolver.
//!
//! Three facets stand in for real node properties: `uppercase` plays a
//! node category (client, dut, server), `lowercase` a refinement (OS type,
//! cloud vendor), `number` a version or build. The resolver recognizes a
//! fixed set of combinations and constructs the matching node, complete
//! with its factory chain and agent registry.

use stairway_topology::{
    Agency, AgentKind, CliAgent, Constraint, ConstraintSchema, ConstraintSet, Industry,
    NativeAgent, NodeContext, Resolver, RestAgent, TopologyError,
};
use std::sync::Arc;

/// Facet naming the node category.
pub const UPPERCASE: &str = "uppercase";
/// Facet naming the node refinement.
pub const LOWERCASE: &str = "lowercase";
/// Facet naming the version/build.
pub const NUMBER: &str = "number";
/// Facet naming the execution mechanism.
pub const AGENT: &str = "agent";

pub const UPPERCASES: [&str; 3] = ["A", "B", "C"];
pub const LOWERCASES: [&str; 3] = ["a", "b", "c"];
pub const NUMBERS: [&str; 3] = ["1", "2", "3"];

/// The closed set of valid facet/value pairs for the demo domain.
#[must_use]
pub fn demo_schema() -> Arc<ConstraintSchema> {
    Arc::new(
        ConstraintSchema::new()
            .permit(UPPERCASE, UPPERCASES)
            .permit(LOWERCASE, LOWERCASES)
            .permit(NUMBER, NUMBERS)
            .permit(AGENT, AgentKind::ALL.map(|kind| kind.name())),
    )
}

/// A fresh constraint set over the demo schema.
pub fn demo_constraints(
    uppercase: &str,
    lowercase: &str,
    number: &str,
    agent: AgentKind,
) -> Result<ConstraintSet, TopologyError> {
    ConstraintSet::new(demo_schema())
        .with(Constraint::eq(UPPERCASE, uppercase))?
        .with(Constraint::eq(LOWERCASE, lowercase))?
        .with(Constraint::eq(NUMBER, number))?
        .with(Constraint::eq(AGENT, agent.name()))
}

/// Exposes a node's dynamically supplied name; the demo's stand-in for a
/// real automation object.
pub trait Namer: std::fmt::Debug {
    fn name(&self) -> &str;
}

/// Namer backed by the native agent.
#[derive(Debug)]
struct NativeNamer {
    name: &'static str,
}

impl Namer for NativeNamer {
    fn name(&self) -> &str {
        self.name
    }
}

/// Builds namers for one node through whichever agent is active.
pub struct NamerFactory {
    node_name: &'static str,
}

impl NamerFactory {
    /// Only the native mechanism has a namer driver in the demo.
    pub fn make_namer(&self, agency: &Agency) -> Result<Box<dyn Namer>, TopologyError> {
        match agency.active_kind() {
            AgentKind::Native => Ok(Box::new(NativeNamer {
                name: self.node_name,
            })),
            kind => Err(TopologyError::AgentNotRegistered { kind }),
        }
    }
}

/// The demo node's factory chain: versioned by the resolved combination,
/// so cases stay oblivious to which node they were given.
#[derive(Debug)]
pub struct DemoIndustry {
    node_name: &'static str,
    agency: Agency,
}

impl DemoIndustry {
    #[must_use]
    pub fn make_namer_factory(&self) -> NamerFactory {
        NamerFactory {
            node_name: self.node_name,
        }
    }
}

impl Industry for DemoIndustry {
    fn agency(&self) -> &Agency {
        &self.agency
    }
}

/// A resolved demo resource: context, factory chain, agent registry.
#[derive(Debug)]
pub struct DemoNode {
    pub name: &'static str,
    pub context: NodeContext,
    industry: DemoIndustry,
}

impl DemoNode {
    #[must_use]
    pub fn industry(&self) -> &DemoIndustry {
        &self.industry
    }
}

fn demo_node(name: &'static str, agent: AgentKind) -> Result<DemoNode, TopologyError> {
    let mut agency = Agency::new(AgentKind::Native)
        .with_agent(Box::new(NativeAgent))
        .with_agent(Box::new(CliAgent::default()))
        .with_agent(Box::new(RestAgent::default()));
    agency.activate(agent)?;

    let mut context = NodeContext::new();
    context.default_agent = Some(agent);

    Ok(DemoNode {
        name,
        context,
        industry: DemoIndustry {
            node_name: name,
            agency,
        },
    })
}

/// Deterministic baseline resolver: a pure function of the equality
/// constraint values over a fixed, closed set of node constructors.
/// Unmatched combinations fail loudly.
#[derive(Debug, Default)]
pub struct DemoResolver;

impl Resolver for DemoResolver {
    type Handle = DemoNode;

    fn resolve_resource(
        &self,
        name: &str,
        constraints: &ConstraintSet,
    ) -> Result<Self::Handle, TopologyError> {
        let uppercase = constraints.eq_value(UPPERCASE);
        let lowercase = constraints.eq_value(LOWERCASE);
        let number = constraints.eq_value(NUMBER);
        let agent = match constraints.eq_value(AGENT) {
            Some(raw) => raw.parse::<AgentKind>()?,
            None => AgentKind::Native,
        };

        let node_name = match (uppercase, lowercase, number) {
            (Some("A"), Some("a"), Some("1")) => "Aa1",
            (Some("A"), Some("a"), Some("2")) => "Aa2",
            (Some("B"), Some("c"), Some("3")) => "Bc3",
            _ => {
                return Err(TopologyError::Unsatisfiable {
                    resource: name.to_string(),
                    detail: format!(
                        "no node registered for uppercase={} lowercase={} number={}",
                        uppercase.unwrap_or("<unset>"),
                        lowercase.unwrap_or("<unset>"),
                        number.unwrap_or("<unset>"),
                    ),
                })
            }
        };
        tracing::debug!(resource = name, node = node_name, %agent, "resolved demo node");
        demo_node(node_name, agent)
    }
}
