//! The phased case lifecycle.
//!
//! A case is the main construct by which meaningful tests execute. Its
//! behavior is a trait with one hook per phase; [`CaseRunner`] owns the
//! aggregate result and drives the fixed sequence
//! `reserve → prepare → test → audit → restore → report → release`, with
//! the four middle phases in a single protected region.

use crate::policy::RunContext;
use crate::result::{AggregateResult, ResultKind};
use crate::stair::Stairs;
use crate::testable::Testable;
use serde::{Deserialize, Serialize};
use stairway_report::{Level, Visibility};
use std::fmt;

/// The ordered phases of a case execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Resolve resource constraints into a concrete topology
    Reserve,
    /// Drive resources to base state, build objects the story needs
    Prepare,
    /// What it is all about
    Test,
    /// Standardized checks for tangential side effects
    Audit,
    /// Recover base state of persistent systems
    Restore,
    /// Render the final result tree
    Report,
    /// Return reserved resources
    Release,
}

impl Phase {
    /// The phases executed inside the protected region.
    pub const PROTECTED: [Phase; 4] = [Phase::Prepare, Phase::Test, Phase::Audit, Phase::Restore];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Reserve => "reserve",
            Phase::Prepare => "prepare",
            Phase::Test => "test",
            Phase::Audit => "audit",
            Phase::Restore => "restore",
            Phase::Report => "report",
            Phase::Release => "release",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case behavior: one hook per phase, all but `test` defaulting to no-ops.
///
/// `reserve` and `release` deal in raw resources and receive the run
/// context; the protected phases receive a [`Stairs`] scope to run steps
/// and flights against the case's aggregate. Hooks fail by returning an
/// error; the runner converts protected-phase faults into an abend result.
pub trait Case {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Resolve this case's resource constraints into usable objects.
    /// Failures here propagate uncaught: without resources nothing else
    /// in the case is meaningful.
    fn reserve(&mut self, ctx: &RunContext) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    fn prepare(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let _ = stairs;
        Ok(())
    }

    fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()>;

    fn audit(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let _ = stairs;
        Ok(())
    }

    fn restore(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
        let _ = stairs;
        Ok(())
    }

    /// Free reserved objects. Always runs, even after an abend, so
    /// resource leaks stay bounded.
    fn release(&mut self, ctx: &RunContext) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Wrap this behavior in a runner, ready for a suite or direct
    /// execution.
    fn runner(self) -> CaseRunner<Self>
    where
        Self: Sized,
    {
        CaseRunner::new(self)
    }
}

/// Drives a [`Case`] through its phases and owns its aggregate result.
pub struct CaseRunner<C: Case> {
    case: C,
    result: AggregateResult,
}

impl<C: Case> CaseRunner<C> {
    #[must_use]
    pub fn new(case: C) -> Self {
        let description = format!("{} ({})", case.name(), case.description());
        let result = AggregateResult::new(ResultKind::Case, case.name(), description);
        Self { case, result }
    }

    #[must_use]
    pub fn case(&self) -> &C {
        &self.case
    }

    pub fn case_mut(&mut self) -> &mut C {
        &mut self.case
    }

    fn phase_label(name: &str, phase: Phase) -> String {
        format!("{name} / {phase} phase")
    }

    /// Run the protected phases, stopping at the first fault or once the
    /// run concludes. The first fault is returned for conversion into an
    /// abend result; it never escapes the case.
    fn run_protected(&mut self, ctx: &RunContext, name: &str) -> anyhow::Result<()> {
        let reporter = ctx.reporter().clone();
        for phase in Phase::PROTECTED {
            if ctx.concluded() {
                tracing::info!(case = %name, %phase, "skipping phase; run concluded");
                break;
            }
            reporter.demarcate(
                &Self::phase_label(name, phase),
                None,
                Visibility::Medium,
                || {
                    let mut stairs = Stairs::new(ctx, &mut self.result);
                    match phase {
                        Phase::Prepare => self.case.prepare(&mut stairs),
                        Phase::Test => self.case.test(&mut stairs),
                        Phase::Audit => self.case.audit(&mut stairs),
                        Phase::Restore => self.case.restore(&mut stairs),
                        Phase::Reserve | Phase::Report | Phase::Release => Ok(()),
                    }
                },
            )?;
        }
        Ok(())
    }
}

impl<C: Case> Testable for CaseRunner<C> {
    fn name(&self) -> &str {
        self.case.name()
    }

    fn description(&self) -> String {
        self.case.description().to_string()
    }

    fn execute(&mut self, ctx: &RunContext) -> anyhow::Result<()> {
        let reporter = ctx.reporter().clone();
        let name = self.case.name().to_string();

        reporter.demarcate(&name, Some(Level::Info), Visibility::Major, || {
            reporter.emit_plain(&format!("Description: {}", self.case.description()));
            reporter.emit_plain(&format!("Parameters: {}", ctx.params_display()));

            reporter.demarcate(
                &Self::phase_label(&name, Phase::Reserve),
                None,
                Visibility::Medium,
                || self.case.reserve(ctx),
            )?;

            if let Err(fault) = self.run_protected(ctx, &name) {
                tracing::error!(case = %name, "protected phase fault: {fault:#}");
                self.result.force_abend(render_fault(&fault));
            }

            reporter.demarcate(
                &Self::phase_label(&name, Phase::Report),
                None,
                Visibility::Medium,
                || self.result.report(&reporter, true, 0),
            );

            reporter.demarcate(
                &Self::phase_label(&name, Phase::Release),
                None,
                Visibility::Medium,
                || self.case.release(ctx),
            )
        })
    }

    fn result(&self) -> &AggregateResult {
        &self.result
    }

    fn reset_result(&mut self) {
        self.result.reset();
    }
}

/// Fault display plus its full causal chain, for abend messages.
fn render_fault(fault: &anyhow::Error) -> String {
    let mut text = fault.to_string();
    for cause in fault.chain().skip(1) {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{NoInspect, Response, RunConfig};
    use crate::stair::Stair;
    use crate::state::State;
    use crate::step::Step;
    use stairway_report::Reporter;
    use std::sync::Arc;

    fn test_ctx() -> (RunContext, Arc<stairway_report::CaptureSink>) {
        let (reporter, sink) = Reporter::capture(Level::Debug);
        let config = RunConfig {
            response: Response::Proceed,
            ..RunConfig::default()
        };
        let ctx = RunContext::new(config, reporter).with_inspector(Box::new(NoInspect));
        (ctx, sink)
    }

    #[derive(Default)]
    struct Probe {
        fault_in_test: bool,
        audited: bool,
        released: bool,
    }

    impl Case for Probe {
        fn name(&self) -> &str {
            "Probe"
        }

        fn description(&self) -> &str {
            "lifecycle probe"
        }

        fn test(&mut self, stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
            if self.fault_in_test {
                anyhow::bail!("fixture exploded");
            }
            stairs.step(Step::new("probe check"), |step| {
                step.resolve(State::Pass, "ok");
                Ok(())
            })
        }

        fn audit(&mut self, _stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
            self.audited = true;
            Ok(())
        }

        fn release(&mut self, _ctx: &RunContext) -> anyhow::Result<()> {
            self.released = true;
            Ok(())
        }
    }

    #[test]
    fn clean_case_passes_through_all_phases() {
        let (ctx, sink) = test_ctx();
        let mut runner = Probe::default().runner();
        runner.execute(&ctx).unwrap();

        assert_eq!(runner.result().state(), State::Pass);
        assert!(runner.case().audited);
        assert!(runner.case().released);
        let transcript = sink.contents();
        for phase in ["reserve", "prepare", "test", "audit", "restore", "report", "release"] {
            assert!(
                transcript.contains(&format!("Probe / {phase} phase")),
                "missing {phase} demarcation"
            );
        }
    }

    #[test]
    fn test_fault_abends_but_still_reports_and_releases() {
        let (ctx, sink) = test_ctx();
        let mut runner = Probe {
            fault_in_test: true,
            ..Probe::default()
        }
        .runner();
        runner.execute(&ctx).unwrap();

        assert_eq!(runner.result().state(), State::Abend);
        assert!(runner.result().outcome().message.contains("fixture exploded"));
        // audit sits after the fault inside the protected region
        assert!(!runner.case().audited);
        // release always runs
        assert!(runner.case().released);
        assert!(sink.contents().contains("Probe / release phase"));
    }

    struct ReserveFails;

    impl Case for ReserveFails {
        fn name(&self) -> &str {
            "ReserveFails"
        }

        fn description(&self) -> &str {
            "reserve fault propagation"
        }

        fn reserve(&mut self, _ctx: &RunContext) -> anyhow::Result<()> {
            anyhow::bail!("no lab hardware")
        }

        fn test(&mut self, _stairs: &mut Stairs<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn reserve_fault_propagates_uncaught() {
        let (ctx, _sink) = test_ctx();
        let mut runner = ReserveFails.runner();
        let fault = runner.execute(&ctx).unwrap_err();
        assert!(fault.to_string().contains("no lab hardware"));
        assert_eq!(runner.result().state(), State::Untested);
    }

    #[test]
    fn render_fault_includes_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let fault = anyhow::Error::new(io).context("agent lost");
        let text = render_fault(&fault);
        assert!(text.starts_with("agent lost"));
        assert!(text.contains("caused by: socket closed"));
    }
}
