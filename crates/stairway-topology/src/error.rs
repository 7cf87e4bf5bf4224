//! Error types for constraint handling and resolution.

use crate::agent::AgentKind;

/// Errors raised while declaring or resolving topology constraints
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// The facet/value pair is outside the closed valid set; rejected when
    /// the constraint is added, never at resolution time
    #[error("constraint '{facet} {operator} {value}' not in valid constraints")]
    InvalidConstraint {
        facet: String,
        operator: String,
        value: String,
    },

    /// No handle can be derived for the declared constraints
    #[error("no resource satisfies constraints for '{resource}': {detail}")]
    Unsatisfiable { resource: String, detail: String },

    /// Text does not name an enumerated agent kind
    #[error("agent kind '{0}' not in valid agent kinds")]
    UnknownAgentKind(String),

    /// The requested agent kind is not registered in the agency
    #[error("agent '{kind}' not registered in agency")]
    AgentNotRegistered { kind: AgentKind },
}
