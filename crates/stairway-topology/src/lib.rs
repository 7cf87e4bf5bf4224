//! Topology constraints and their resolution into concrete resources.
//!
//! A case declares *what* it needs as a [`TopologyConstraint`]: a mapping
//! from resource name to a set of facet constraints. A [`Resolver`] turns
//! that into a [`Topology`]: the same names bound to concrete, opaque
//! handles the case then exercises. The baseline resolution strategy is a
//! pure function of the constraint values; production implementations
//! swap in inventory lookup or dynamic provisioning behind the same
//! map-in/map-out contract.

pub mod agent;
pub mod constraint;
pub mod error;
pub mod resolve;

pub use agent::{Agency, Agent, AgentKind, CliAgent, Industry, NativeAgent, NodeContext, RestAgent};
pub use constraint::{Constraint, ConstraintSchema, ConstraintSet, Operator, TopologyConstraint};
pub use error::TopologyError;
pub use resolve::{Resolver, Topology};
