//! The resolver contract and the resolved topology.

use crate::constraint::{ConstraintSet, TopologyConstraint};
use crate::error::TopologyError;
use std::collections::BTreeMap;

/// A resolved topology: each declared resource name bound to a concrete
/// handle. The handle type is opaque to the engine; it is whatever the
/// resolver's domain needs (the demo binds factory chains and agent
/// registries).
#[derive(Debug, Clone, Default)]
pub struct Topology<H> {
    resources: BTreeMap<String, H>,
}

impl<H> Topology<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, handle: H) {
        self.resources.insert(name.into(), handle);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&H> {
        self.resources.get(name)
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.resources.iter().map(|(name, handle)| (name.as_str(), handle))
    }

    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Turns declared constraints into concrete resource handles.
///
/// This is the extension point of the topology layer: the provided
/// [`Resolver::resolve`] guarantees one handle per declared resource name
/// and implementations supply the per-resource strategy. The baseline
/// strategy is deterministic and side-effect free; richer deployments may
/// reserve inventory or provision dynamically, but must either yield a
/// fully usable handle or fail with [`TopologyError::Unsatisfiable`] —
/// never a partially-initialized resource.
pub trait Resolver {
    type Handle;

    /// Derive the handle for one named resource.
    fn resolve_resource(
        &self,
        name: &str,
        constraints: &ConstraintSet,
    ) -> Result<Self::Handle, TopologyError>;

    /// Resolve every declared resource, in name order.
    fn resolve(
        &self,
        constraint: &TopologyConstraint,
    ) -> Result<Topology<Self::Handle>, TopologyError> {
        let mut topology = Topology::new();
        for (name, constraints) in constraint.iter() {
            tracing::debug!(resource = name, constraints = constraints.len(), "resolving");
            let handle = self.resolve_resource(name, constraints)?;
            topology.insert(name, handle);
        }
        Ok(topology)
    }
}
