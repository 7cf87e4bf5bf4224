//! The object-safe surface every executable testable exposes.

use crate::policy::RunContext;
use crate::result::AggregateResult;

/// Anything with a lifecycle and a recordable result: a case runner or a
/// suite. Suites hold their children through this trait.
pub trait Testable {
    /// Short name for summary references.
    fn name(&self) -> &str;

    /// Long description for meaningful reporting.
    fn description(&self) -> String;

    /// Run the testable to completion. Faults escaping here are the ones
    /// the engine does not recover from (reserve failures, API misuse);
    /// anything a case catches itself surfaces only as a bad result.
    fn execute(&mut self, ctx: &RunContext) -> anyhow::Result<()>;

    /// The current (or final) result.
    fn result(&self) -> &AggregateResult;

    /// Discard transient results between retries of the same testable.
    fn reset_result(&mut self);
}
