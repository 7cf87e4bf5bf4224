//! Stairway engine.
//!
//! Runs hierarchical collections of verification steps, tracks outcomes
//! with a severity-ordered [`State`] model, aggregates results upward
//! through the testable tree (first-worst-wins), and drives cases through
//! the `reserve → prepare → test → audit → restore → report → release`
//! lifecycle.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stairway_core::prelude::*;
//!
//! struct Smoke;
//!
//! impl Case for Smoke {
//!     fn name(&self) -> &str { "Smoke" }
//!     fn description(&self) -> &str { "one passing check" }
//!     fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
//!         stairs.step(Step::new("it works"), |step| {
//!             step.resolve(State::Pass, "all good");
//!             Ok(())
//!         })
//!     }
//! }
//!
//! let ctx = RunContext::console(RunConfig::default());
//! let mut suite = Suite::new("Smokes", "smoke checks").with_case(Smoke);
//! suite.execute(&ctx)?;
//! ```

pub mod case;
pub mod error;
pub mod policy;
pub mod result;
pub mod stair;
pub mod state;
pub mod step;
pub mod suite;
pub mod testable;

pub use case::{Case, CaseRunner, Phase};
pub use error::EngineError;
pub use policy::{Inspect, LogInspect, NoInspect, PromptInspect, Response, RunConfig, RunContext};
pub use result::{AggregateResult, Aggregator, Outcome, Recordable, ResultKind, StepResult, TestResult};
pub use stair::{Flight, Stair, Stairs};
pub use state::State;
pub use step::{Expectations, Step};
pub use suite::Suite;
pub use testable::Testable;

/// The names most cases and suites need.
pub mod prelude {
    pub use crate::case::{Case, CaseRunner, Phase};
    pub use crate::policy::{Response, RunConfig, RunContext};
    pub use crate::result::{Aggregator, Recordable};
    pub use crate::stair::{Flight, Stair, Stairs};
    pub use crate::state::State;
    pub use crate::step::{Expectations, Step};
    pub use crate::suite::Suite;
    pub use crate::testable::Testable;
}
