//! Error types for the report sink.

/// Errors raised at the reporting boundary
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Text does not name an enumerated report level
    #[error("level '{0}' not in valid levels")]
    InvalidLevel(String),

    /// Text does not name an enumerated visibility
    #[error("visibility '{0}' not in valid visibilities")]
    InvalidVisibility(String),
}
