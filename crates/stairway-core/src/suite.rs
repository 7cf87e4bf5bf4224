//! Suites: ordered compositions of cases and nested suites.

use crate::case::{Case, CaseRunner};
use crate::policy::RunContext;
use crate::result::{AggregateResult, Recordable, ResultKind};
use crate::testable::Testable;
use stairway_report::{Level, Visibility};

/// An ordered sequence of sub-testables run to completion in declaration
/// order. No parallelism and no short-circuiting: a bad result in one
/// sub-testable never prevents later siblings from running.
///
/// Suites are organizational, so they only execute `test` and `report`
/// phases of their own; the richer lifecycle belongs to their cases.
pub struct Suite {
    name: String,
    description: String,
    testables: Vec<Box<dyn Testable>>,
    result: AggregateResult,
}

impl Suite {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let description = description.into();
        let result = AggregateResult::new(
            ResultKind::Suite,
            &name,
            format!("{name} ({description})"),
        );
        Self {
            name,
            description,
            testables: Vec::new(),
            result,
        }
    }

    /// Append a sub-testable (case runner or nested suite).
    #[must_use]
    pub fn with(mut self, testable: impl Testable + 'static) -> Self {
        self.testables.push(Box::new(testable));
        self
    }

    /// Append a bare case behavior, wrapping it in a runner.
    #[must_use]
    pub fn with_case(self, case: impl Case + 'static) -> Self {
        self.with(CaseRunner::new(case))
    }

    pub fn push(&mut self, testable: Box<dyn Testable>) {
        self.testables.push(testable);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.testables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.testables.is_empty()
    }
}

impl Testable for Suite {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn execute(&mut self, ctx: &RunContext) -> anyhow::Result<()> {
        let reporter = ctx.reporter().clone();
        let name = self.name.clone();

        reporter.demarcate(&name, Some(Level::Info), Visibility::Major, || {
            reporter.emit_plain(&format!("Description: {}", self.description));
            reporter.emit_plain(&format!("Parameters: {}", ctx.params_display()));

            reporter.demarcate(
                &format!("{name} / test phase"),
                None,
                Visibility::Medium,
                || -> anyhow::Result<()> {
                    for testable in &mut self.testables {
                        if ctx.concluded() {
                            reporter.emit(
                                &format!("skipping {}: run concluded early", testable.name()),
                                Some(Level::Crucial),
                                Visibility::Minor,
                            );
                            self.result.record(testable.result().clone().into_record());
                            continue;
                        }
                        tracing::debug!(suite = %name, testable = testable.name(), "executing");
                        testable.execute(ctx)?;
                        self.result.record(testable.result().clone().into_record());
                    }
                    Ok(())
                },
            )?;

            // conclusion is consumed at this suite's boundary; outer
            // suites proceed to their next sibling
            ctx.clear_conclusion();

            reporter.demarcate(
                &format!("{name} / report phase"),
                None,
                Visibility::Medium,
                || self.result.report(&reporter, false, 0),
            );
            Ok(())
        })
    }

    fn result(&self) -> &AggregateResult {
        &self.result
    }

    fn reset_result(&mut self) {
        self.result.reset();
    }
}
