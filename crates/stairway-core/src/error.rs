//! Error types for the engine.
//!
//! Case faults are deliberately *not* here: a fault raised by a phase hook
//! travels as an [`anyhow::Error`] so its full causal chain survives into
//! the abend message. `EngineError` covers misuse of the engine's own
//! surface, which is always fatal to the operation attempting it.

use stairway_report::ReportError;

/// Errors raised at the engine boundary
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Text does not name an enumerated outcome state
    #[error("state '{0}' not in valid states")]
    InvalidState(String),

    /// Text does not name an enumerated failure response
    #[error("response '{0}' not in valid responses")]
    InvalidResponse(String),

    /// Text does not name an enumerated report level
    #[error(transparent)]
    InvalidLevel(#[from] ReportError),
}
