//! Execution mechanisms behind resolved resources.
//!
//! A resolved resource handle carries two things the engine never looks
//! inside: an [`Industry`] (the factory chain that builds the resource's
//! automation objects) and an [`Agency`] (the registry of agents those
//! objects execute through). A single capability can be backed by several
//! agents — native library calls, a CLI session, a REST client — and the
//! test stays oblivious to which one is active.

use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The mechanism class an agent executes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Executes in the immediate environment using local libraries
    Native,
    /// Executes via a driven command-line session
    Cli,
    /// Executes via a REST client against a REST server
    Rest,
}

impl AgentKind {
    /// All kinds. Used to build CLI choice lists.
    pub const ALL: [AgentKind; 3] = [AgentKind::Native, AgentKind::Cli, AgentKind::Rest];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Native => "native",
            AgentKind::Cli => "cli",
            AgentKind::Rest => "rest",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TopologyError::UnknownAgentKind(s.to_string()))
    }
}

/// An execution mechanism for automation actions.
pub trait Agent: fmt::Debug {
    fn kind(&self) -> AgentKind;
}

/// Performs actions via the local process (e.g. the standard library
/// manipulating files directly).
#[derive(Debug, Default)]
pub struct NativeAgent;

impl Agent for NativeAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Native
    }
}

/// Performs actions through a driven CLI connection (telnet/ssh).
#[derive(Debug, Default)]
pub struct CliAgent {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Agent for CliAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Cli
    }
}

/// Performs actions through a standard REST interface.
#[derive(Debug, Default)]
pub struct RestAgent {
    pub base_url: Option<String>,
}

impl Agent for RestAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Rest
    }
}

/// The collection of agents available to one resolved resource.
///
/// Automation objects ask the agency for the currently active agent; a
/// default applies when nothing was explicitly activated.
#[derive(Debug)]
pub struct Agency {
    agents: BTreeMap<AgentKind, Box<dyn Agent>>,
    default: AgentKind,
    active: Option<AgentKind>,
}

impl Agency {
    #[must_use]
    pub fn new(default: AgentKind) -> Self {
        Self {
            agents: BTreeMap::new(),
            default,
            active: None,
        }
    }

    /// Register an agent under its own kind, replacing any previous one.
    pub fn register(&mut self, agent: Box<dyn Agent>) {
        self.agents.insert(agent.kind(), agent);
    }

    /// Builder form of [`Agency::register`].
    #[must_use]
    pub fn with_agent(mut self, agent: Box<dyn Agent>) -> Self {
        self.register(agent);
        self
    }

    /// Make `kind` the active mechanism for subsequent actions.
    pub fn activate(&mut self, kind: AgentKind) -> Result<(), TopologyError> {
        if !self.agents.contains_key(&kind) {
            return Err(TopologyError::AgentNotRegistered { kind });
        }
        self.active = Some(kind);
        Ok(())
    }

    /// The kind actions currently execute through.
    #[must_use]
    pub fn active_kind(&self) -> AgentKind {
        self.active.unwrap_or(self.default)
    }

    #[must_use]
    pub fn default_kind(&self) -> AgentKind {
        self.default
    }

    /// The agent actions currently execute through.
    pub fn active(&self) -> Result<&dyn Agent, TopologyError> {
        let kind = self.active_kind();
        self.agents
            .get(&kind)
            .map(Box::as_ref)
            .ok_or(TopologyError::AgentNotRegistered { kind })
    }
}

/// The factory chain of a resolved resource: builds purpose-specific
/// factories which in turn build the automation objects that interact
/// with the system under test. Implementations are version-specific, so
/// once a resource is resolved the test is oblivious to those details.
pub trait Industry {
    fn agency(&self) -> &Agency;
}

/// Instance-specific properties of a resolved resource (addresses,
/// credentials, arbitrary case context).
#[derive(Debug, Clone, Default)]
pub struct NodeContext {
    pub default_agent: Option<AgentKind>,
    pub extra: BTreeMap<String, String>,
}

impl NodeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
