//! Scoped execution of steps and flights.
//!
//! A [`Stair`] is any aggregator able to run scoped steps and scoped
//! nested flights. [`Flight`] plays a dual role by composition rather than
//! inheritance: toward its children it is a `Stair`, toward its parent it
//! is just another recordable result, folded in verbatim with no
//! reassessment at scope exit. That composition is what allows unbounded
//! nesting of flights within flights.

use crate::policy::{Response, RunContext};
use crate::result::{AggregateResult, Aggregator, Recordable, ResultKind};
use crate::step::Step;
use stairway_report::{Level, Visibility};

/// Capability: run scoped steps and flights against an owned aggregate.
pub trait Stair: Aggregator {
    fn context(&self) -> &RunContext;

    /// Run one step to completion inside this stair's scope.
    ///
    /// The body drives the step's outcome and may fail; either way the
    /// step is assessed against its expectations, reported, and recorded
    /// before control leaves the scope. A bad final state then consults
    /// the failure-response policy: halt suspends via the context's
    /// inspector when both the step and the run ask for it, conclude
    /// raises the run's conclusion flag.
    fn step<T>(
        &mut self,
        step: Step,
        body: impl FnOnce(&mut Step) -> anyhow::Result<T>,
    ) -> anyhow::Result<T>
    where
        Self: Sized,
    {
        let mut step = step;
        let body_result = body(&mut step);
        step.assess();

        let step_response = step.response();
        let result = step.into_result();
        result.report(self.context().reporter(), 0);

        let head = result.outcome().clone();
        self.record(result);

        if head.state().is_bad() {
            let ctx = self.context();
            let run_response = ctx.response();
            if run_response == Response::Halt && step_response == Response::Halt {
                ctx.inspect(&head);
            } else if run_response == Response::Conclude || step_response == Response::Conclude {
                tracing::info!(state = %head.state(), "bad state; concluding run early");
                ctx.request_conclusion();
            } else {
                tracing::debug!(state = %head.state(), "bad state; proceeding per policy");
            }
        }

        body_result
    }

    /// Run a nested flight inside this stair's scope.
    ///
    /// The flight's aggregate is recorded into this stair's aggregate
    /// as-is: whatever the flight accumulated is its result.
    fn flight<T>(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
        body: impl FnOnce(&mut Flight<'_>) -> anyhow::Result<T>,
    ) -> anyhow::Result<T>
    where
        Self: Sized,
    {
        let name = name.unwrap_or(Flight::UNNAMED).to_string();
        let reporter = self.context().reporter().clone();

        let mut flight = Flight::new(self.context(), &name, description);
        let body_result = reporter.demarcate(
            &format!("'{name}' Flight"),
            Some(Level::Info),
            Visibility::Minor,
            || body(&mut flight),
        );

        let result = flight.into_result();
        result.report(&reporter, false, 0);
        self.record(result);

        body_result
    }
}

/// Borrowed stair scope over an aggregate owned elsewhere (a case runner
/// hands one of these to each protected phase hook).
pub struct Stairs<'a> {
    ctx: &'a RunContext,
    result: &'a mut AggregateResult,
}

impl<'a> Stairs<'a> {
    #[must_use]
    pub fn new(ctx: &'a RunContext, result: &'a mut AggregateResult) -> Self {
        Self { ctx, result }
    }
}

impl Aggregator for Stairs<'_> {
    fn aggregate(&self) -> &AggregateResult {
        self.result
    }

    fn aggregate_mut(&mut self) -> &mut AggregateResult {
        self.result
    }
}

impl Stair for Stairs<'_> {
    fn context(&self) -> &RunContext {
        self.ctx
    }
}

/// A named, nestable grouping of steps reported as one unit.
///
/// Useful for large numbers of similar permutations, and for iterating
/// the same sequence to shake out intermittent issues (pair with
/// `reset` on the owning result between iterations).
pub struct Flight<'a> {
    ctx: &'a RunContext,
    result: AggregateResult,
}

impl<'a> Flight<'a> {
    /// Display name for anonymous flights.
    pub const UNNAMED: &'static str = "Unnamed";

    #[must_use]
    pub fn new(ctx: &'a RunContext, name: &str, description: Option<&str>) -> Self {
        let description = match description {
            Some(text) => format!("{name} ({text})"),
            None => name.to_string(),
        };
        Self {
            ctx,
            result: AggregateResult::new(ResultKind::Flight, name, description),
        }
    }

    /// Finish the flight, yielding its recordable aggregate.
    #[must_use]
    pub fn into_result(self) -> AggregateResult {
        self.result
    }
}

impl Aggregator for Flight<'_> {
    fn aggregate(&self) -> &AggregateResult {
        &self.result
    }

    fn aggregate_mut(&mut self) -> &mut AggregateResult {
        &mut self.result
    }
}

impl Stair for Flight<'_> {
    fn context(&self) -> &RunContext {
        self.ctx
    }
}

impl Recordable for Flight<'_> {
    fn into_record(self) -> crate::result::TestResult {
        self.into_result().into_record()
    }
}
