//! Report sink for stairway test runs.
//!
//! Everything a run prints goes through a [`Reporter`]: a severity
//! [`Level`] threshold decides whether a line is emitted at all, a
//! [`Visibility`] decides how prominently it is formatted, and a [`Sink`]
//! decides where the text lands (stdout for real runs, an in-memory buffer
//! for tests). Formatting never feeds back into control flow.

pub mod error;
pub mod level;
pub mod reporter;
pub mod sink;

pub use error::ReportError;
pub use level::{Level, Visibility};
pub use reporter::Reporter;
pub use sink::{CaptureSink, ConsoleSink, Sink};
