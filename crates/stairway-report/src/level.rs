//! Report levels and visibilities.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity level of a report line.
///
/// A [`Reporter`](crate::Reporter) suppresses lines below its active
/// threshold. Ordering follows variant order, `Debug` lowest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Developer diagnostics
    Debug,
    /// Fine-grained run detail
    Detail,
    /// Normal run narration (default threshold)
    Info,
    /// Noteworthy events worth keeping in terse transcripts
    Crucial,
    /// Something looks off but the run continues
    Warning,
    /// A definite problem
    Error,
    /// The run cannot continue
    Fatal,
}

impl Level {
    /// All levels, lowest first. Used to build CLI choice lists.
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Detail,
        Level::Info,
        Level::Crucial,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Lowercase name, matching the textual form accepted by `FromStr`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Detail => "detail",
            Level::Info => "info",
            Level::Crucial => "crucial",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReportError::InvalidLevel(s.to_string()))
    }
}

/// How prominently a line is rendered.
///
/// Visibility affects formatting only, never filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Plain line, optionally tagged with its level and a timestamp
    Minor,
    /// Single-line banner bracketed by delimiters
    Medium,
    /// Full-width banner block
    Major,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Visibility::Minor => "minor",
            Visibility::Medium => "medium",
            Visibility::Major => "major",
        };
        f.write_str(name)
    }
}

impl FromStr for Visibility {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minor" => Ok(Visibility::Minor),
            "medium" => Ok(Visibility::Medium),
            "major" => Ok(Visibility::Major),
            _ => Err(ReportError::InvalidVisibility(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Debug < Level::Detail);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn level_round_trip() {
        for level in Level::ALL {
            assert_eq!(level.name().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn level_parse_rejects_unknown() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, ReportError::InvalidLevel(_)));
    }

    #[test]
    fn visibility_parse() {
        assert_eq!("major".parse::<Visibility>().unwrap(), Visibility::Major);
        assert!("loud".parse::<Visibility>().is_err());
    }
}
