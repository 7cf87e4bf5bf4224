//! Run configuration, failure-response policy, and the run context.
//!
//! Everything that was once process-global (the active report threshold,
//! the failure-response policy) lives on an explicit [`RunContext`] that is
//! threaded through every testable's entry point, so independent runs can
//! coexist later without touching global state.

use crate::error::EngineError;
use crate::result::Outcome;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use stairway_report::{Level, Reporter};

/// What to do when a step ends in a bad state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    /// Suspend for out-of-band inspection so state can be examined
    #[default]
    Halt,
    /// Finish the current case, then stop issuing sibling cases
    Conclude,
    /// Log the failure and keep running (for minor issues)
    Proceed,
}

impl Response {
    /// All responses. Used to build CLI choice lists.
    pub const ALL: [Response; 3] = [Response::Halt, Response::Conclude, Response::Proceed];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Response::Halt => "halt",
            Response::Conclude => "conclude",
            Response::Proceed => "proceed",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Response {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Response::ALL
            .iter()
            .copied()
            .find(|response| response.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::InvalidResponse(s.to_string()))
    }
}

/// Hook invoked when a bad state is detected under the halt policy.
///
/// Selected by run policy and injectable for tests; never hard-wired to a
/// debugger.
pub trait Inspect {
    fn on_bad_state(&self, outcome: &Outcome);
}

/// Blocks until an operator acknowledges on stdin.
#[derive(Debug, Default)]
pub struct PromptInspect;

impl Inspect for PromptInspect {
    fn on_bad_state(&self, outcome: &Outcome) {
        eprintln!(
            "[halt] bad state {}: {} | {}",
            outcome.state(),
            outcome.description,
            outcome.message
        );
        eprintln!("[halt] inspect the system under test, then press Enter to resume");
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    }
}

/// Logs the bad state and resumes immediately.
#[derive(Debug, Default)]
pub struct LogInspect;

impl Inspect for LogInspect {
    fn on_bad_state(&self, outcome: &Outcome) {
        tracing::warn!(
            state = %outcome.state(),
            description = %outcome.description,
            "bad state"
        );
    }
}

/// Does nothing. For tests.
#[derive(Debug, Default)]
pub struct NoInspect;

impl Inspect for NoInspect {
    fn on_bad_state(&self, _outcome: &Outcome) {}
}

/// Per-run options, parsed from the argument source's named parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Minimum severity to emit
    pub log: Level,
    /// Run-wide failure response
    pub response: Response,
    /// The raw parameter map, kept for transcripts and case-specific keys
    pub params: BTreeMap<String, String>,
}

impl RunConfig {
    /// Parameter key naming the report level.
    pub const LOG: &'static str = "log";
    /// Parameter key naming the failure response.
    pub const RESPONSE: &'static str = "response";

    /// Parse the named-parameter mapping an argument source supplies.
    /// Unknown `log`/`response` values are rejected here, not downstream.
    pub fn from_params(params: BTreeMap<String, String>) -> Result<Self, EngineError> {
        let log = match params.get(Self::LOG) {
            Some(raw) => raw.parse::<Level>().map_err(EngineError::from)?,
            None => Level::Info,
        };
        let response = match params.get(Self::RESPONSE) {
            Some(raw) => raw.parse::<Response>()?,
            None => Response::default(),
        };
        Ok(Self {
            log,
            response,
            params,
        })
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log: Level::Info,
            response: Response::default(),
            params: BTreeMap::new(),
        }
    }
}

/// Per-run state threaded through every testable.
pub struct RunContext {
    reporter: Reporter,
    response: Response,
    inspector: Box<dyn Inspect>,
    concluded: Cell<bool>,
    params: BTreeMap<String, String>,
}

impl RunContext {
    /// Build a context from parsed configuration and a reporter. The
    /// inspector defaults by policy: `Halt` blocks for an operator,
    /// anything else logs and continues.
    #[must_use]
    pub fn new(config: RunConfig, reporter: Reporter) -> Self {
        let inspector: Box<dyn Inspect> = match config.response {
            Response::Halt => Box::new(PromptInspect),
            Response::Conclude | Response::Proceed => Box::new(LogInspect),
        };
        Self {
            reporter,
            response: config.response,
            inspector,
            concluded: Cell::new(false),
            params: config.params,
        }
    }

    /// Context writing to stdout at the configured threshold.
    #[must_use]
    pub fn console(config: RunConfig) -> Self {
        let reporter = Reporter::console(config.log);
        Self::new(config, reporter)
    }

    /// Replace the inspection hook.
    #[must_use]
    pub fn with_inspector(mut self, inspector: Box<dyn Inspect>) -> Self {
        self.inspector = inspector;
        self
    }

    #[inline]
    #[must_use]
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    #[inline]
    #[must_use]
    pub fn response(&self) -> Response {
        self.response
    }

    /// Case-specific parameter lookup.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Render the parameter map for `Parameters:` header lines.
    #[must_use]
    pub fn params_display(&self) -> String {
        let entries: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    /// Invoke the inspection hook for a bad outcome.
    pub fn inspect(&self, outcome: &Outcome) {
        self.inspector.on_bad_state(outcome);
    }

    /// Ask the run to conclude early: the current case stops issuing
    /// phases, its suite skips remaining siblings.
    pub fn request_conclusion(&self) {
        self.concluded.set(true);
    }

    #[inline]
    #[must_use]
    pub fn concluded(&self) -> bool {
        self.concluded.get()
    }

    /// Consumed at a suite boundary so outer suites proceed normally.
    pub fn clear_conclusion(&self) {
        self.concluded.set(false);
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("response", &self.response)
            .field("concluded", &self.concluded.get())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
