//! Declarative constraints on the resources a case needs.

use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Comparison operators a constraint may use.
///
/// The interface allows the full set; the baseline resolver honors
/// equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl Operator {
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Ge => ">=",
            Operator::Gt => ">",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One limiting criterion on a resource facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Name of the facet to constrain (e.g. a version, a platform)
    pub facet: String,
    pub operator: Operator,
    /// Delimiting value for the constraint
    pub value: String,
}

impl Constraint {
    #[must_use]
    pub fn new(facet: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            operator,
            value: value.into(),
        }
    }

    /// Equality constraint, the only kind the baseline resolver consumes.
    #[must_use]
    pub fn eq(facet: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(facet, Operator::Eq, value)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.facet, self.operator, self.value)
    }
}

/// The closed set of facet/value pairs a deployment considers valid.
///
/// Constraint validity is checked against this table when a constraint is
/// added to a set, so invalid declarations surface at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintSchema {
    valid: BTreeMap<String, BTreeSet<String>>,
}

impl ConstraintSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit `values` for `facet`.
    #[must_use]
    pub fn permit<I, S>(mut self, facet: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid
            .entry(facet.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn allows(&self, constraint: &Constraint) -> bool {
        self.valid
            .get(&constraint.facet)
            .is_some_and(|values| values.contains(&constraint.value))
    }

    /// Permitted values for a facet, for CLI choice lists.
    #[must_use]
    pub fn values_of(&self, facet: &str) -> Vec<&str> {
        self.valid
            .get(facet)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// The constraints applying to one named resource.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    schema: Arc<ConstraintSchema>,
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new(schema: Arc<ConstraintSchema>) -> Self {
        Self {
            schema,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint, validating it against the schema first.
    pub fn add(&mut self, constraint: Constraint) -> Result<(), TopologyError> {
        if !self.schema.allows(&constraint) {
            return Err(TopologyError::InvalidConstraint {
                facet: constraint.facet,
                operator: constraint.operator.to_string(),
                value: constraint.value,
            });
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Builder form of [`ConstraintSet::add`].
    pub fn with(mut self, constraint: Constraint) -> Result<Self, TopologyError> {
        self.add(constraint)?;
        Ok(self)
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The equality value declared for `facet`, if any. Resolvers built on
    /// exact matching read their inputs through this.
    #[must_use]
    pub fn eq_value(&self, facet: &str) -> Option<&str> {
        self.constraints
            .iter()
            .find(|c| c.operator == Operator::Eq && c.facet == facet)
            .map(|c| c.value.as_str())
    }
}

/// Constraints for every resource in the topology, keyed by the name the
/// case will use to address the resolved resource.
#[derive(Debug, Clone, Default)]
pub struct TopologyConstraint {
    resources: BTreeMap<String, ConstraintSet>,
}

impl TopologyConstraint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) the constraints for a named resource.
    pub fn add_resource(&mut self, name: impl Into<String>, constraints: ConstraintSet) {
        self.resources.insert(name.into(), constraints);
    }

    /// Withdraw a resource declaration, returning its constraints.
    pub fn remove_resource(&mut self, name: &str) -> Option<ConstraintSet> {
        self.resources.remove(name)
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstraintSet)> {
        self.resources.iter().map(|(name, set)| (name.as_str(), set))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Arc<ConstraintSchema> {
        Arc::new(
            ConstraintSchema::new()
                .permit("platform", ["linux", "bsd"])
                .permit("version", ["1", "2"]),
        )
    }

    #[test]
    fn valid_constraint_is_accepted() {
        let set = ConstraintSet::new(schema())
            .with(Constraint::eq("platform", "linux"))
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.eq_value("platform"), Some("linux"));
    }

    #[test]
    fn invalid_value_is_rejected_at_construction() {
        let err = ConstraintSet::new(schema())
            .with(Constraint::eq("platform", "beos"))
            .unwrap_err();
        assert!(matches!(err, TopologyError::InvalidConstraint { .. }));
        assert!(err.to_string().contains("platform == beos"));
    }

    #[test]
    fn unknown_facet_is_rejected() {
        let err = ConstraintSet::new(schema())
            .with(Constraint::eq("colour", "blue"))
            .unwrap_err();
        assert!(matches!(err, TopologyError::InvalidConstraint { .. }));
    }

    #[test]
    fn eq_value_ignores_other_operators() {
        let mut set = ConstraintSet::new(schema());
        set.add(Constraint::new("version", Operator::Ge, "1")).unwrap();
        assert_eq!(set.eq_value("version"), None);
        set.add(Constraint::eq("version", "2")).unwrap();
        assert_eq!(set.eq_value("version"), Some("2"));
    }

    #[test]
    fn topology_constraint_add_and_remove() {
        let mut topology = TopologyConstraint::new();
        topology.add_resource("dut", ConstraintSet::new(schema()));
        topology.add_resource("client", ConstraintSet::new(schema()));
        assert_eq!(topology.len(), 2);

        let removed = topology.remove_resource("dut");
        assert!(removed.is_some());
        assert_eq!(topology.len(), 1);
        assert!(topology.remove_resource("dut").is_none());
    }
}
