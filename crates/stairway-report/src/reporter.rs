//! The [`Reporter`]: threshold filtering, formatting, demarcation.

use crate::level::{Level, Visibility};
use crate::sink::{CaptureSink, ConsoleSink, Sink};
use std::sync::Arc;
use std::time::Instant;

/// Spaces per nesting level when indenting result trees.
pub const INDENT_WIDTH: usize = 4;

/// Delimiter repeats for single-line banners.
const BANNER_AFFIX: usize = 10;

/// Maximum width of a full banner block.
const BANNER_MAX: usize = 79;

/// Formats run output and hands it to a shared [`Sink`].
///
/// Lines tagged with a [`Level`] below the threshold are suppressed;
/// untagged lines always emit. Cloning a `Reporter` shares the sink.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn Sink>,
    threshold: Level,
}

impl Reporter {
    #[must_use]
    pub fn new(sink: Arc<dyn Sink>, threshold: Level) -> Self {
        Self { sink, threshold }
    }

    /// Reporter writing to stdout.
    #[must_use]
    pub fn console(threshold: Level) -> Self {
        Self::new(Arc::new(ConsoleSink::new()), threshold)
    }

    /// Reporter writing to an in-memory buffer, returned alongside it.
    /// Intended for tests that assert on transcript contents.
    #[must_use]
    pub fn capture(threshold: Level) -> (Self, Arc<CaptureSink>) {
        let sink = Arc::new(CaptureSink::new());
        (Self::new(Arc::clone(&sink) as Arc<dyn Sink>, threshold), sink)
    }

    #[must_use]
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Emit `text` if `level` clears the threshold (`None` always clears).
    pub fn emit(&self, text: &str, level: Option<Level>, visibility: Visibility) {
        self.emit_with(text, level, visibility, '=');
    }

    /// Bare untagged line. Used for headers like `Description:`.
    pub fn emit_plain(&self, text: &str) {
        self.emit(text, None, Visibility::Minor);
    }

    /// Run `body` bracketed by `Entering:`/`Exiting:` lines, the exit line
    /// carrying the elapsed wall time.
    pub fn demarcate<T>(
        &self,
        label: &str,
        level: Option<Level>,
        visibility: Visibility,
        body: impl FnOnce() -> T,
    ) -> T {
        self.emit_with(&format!("Entering: {label}"), level, visibility, '>');
        let started = Instant::now();
        let value = body();
        let elapsed = started.elapsed();
        self.emit_with(
            &format!("Exiting: {label}; Elapsed: {elapsed:.3?}"),
            level,
            visibility,
            '<',
        );
        value
    }

    /// Prefix every line of `text` with `depth` levels of indentation.
    #[must_use]
    pub fn indent(text: &str, depth: usize) -> String {
        if depth == 0 {
            return text.to_string();
        }
        let pad = " ".repeat(depth * INDENT_WIDTH);
        text.lines()
            .map(|line| format!("{pad}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn emit_with(&self, text: &str, level: Option<Level>, visibility: Visibility, delim: char) {
        if let Some(level) = level {
            if level < self.threshold {
                return;
            }
        }
        self.sink.write_chunk(&self.format(text, level, visibility, delim));
    }

    fn format(&self, text: &str, level: Option<Level>, visibility: Visibility, delim: char) -> String {
        match visibility {
            Visibility::Minor => match level {
                Some(level) => {
                    let stamp = chrono::Local::now().format("%H:%M:%S");
                    format!("[{level}] {stamp}  {text}\n")
                }
                None => format!("{text}\n"),
            },
            Visibility::Medium => {
                let affix: String = std::iter::repeat(delim).take(BANNER_AFFIX).collect();
                format!("\n{affix} {text} {affix}\n")
            }
            Visibility::Major => {
                let width = text
                    .lines()
                    .map(str::len)
                    .max()
                    .unwrap_or(0)
                    .clamp(BANNER_AFFIX, BANNER_MAX);
                let line: String = std::iter::repeat(delim).take(width).collect();
                format!("\n{line}\n{text}\n{line}\n")
            }
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn untagged_lines_always_emit() {
        let (reporter, sink) = Reporter::capture(Level::Fatal);
        reporter.emit_plain("header");
        assert_eq!(sink.contents(), "header\n");
    }

    #[test]
    fn threshold_suppresses_low_levels() {
        let (reporter, sink) = Reporter::capture(Level::Warning);
        reporter.emit("quiet", Some(Level::Info), Visibility::Minor);
        assert_eq!(sink.contents(), "");
        reporter.emit("loud", Some(Level::Error), Visibility::Minor);
        assert!(sink.contents().contains("[error]"));
        assert!(sink.contents().contains("loud"));
    }

    #[test]
    fn medium_banner_brackets_text() {
        let (reporter, sink) = Reporter::capture(Level::Debug);
        reporter.emit("phase", None, Visibility::Medium);
        assert_eq!(sink.contents(), "\n========== phase ==========\n");
    }

    #[test]
    fn major_banner_matches_text_width() {
        let (reporter, sink) = Reporter::capture(Level::Debug);
        reporter.emit("a banner headline", None, Visibility::Major);
        let contents = sink.contents();
        let bar: Vec<&str> = contents.lines().filter(|l| l.starts_with('=')).collect();
        assert_eq!(bar.len(), 2);
        assert_eq!(bar[0].len(), "a banner headline".len());
    }

    #[test]
    fn demarcate_brackets_body() {
        let (reporter, sink) = Reporter::capture(Level::Debug);
        let value = reporter.demarcate("reserve phase", None, Visibility::Medium, || 7);
        assert_eq!(value, 7);
        let contents = sink.contents();
        assert!(contents.contains(">>>>>>>>>> Entering: reserve phase >>>>>>>>>>"));
        assert!(contents.contains("<<<<<<<<<< Exiting: reserve phase; Elapsed:"));
    }

    #[test]
    fn indent_prefixes_each_line() {
        assert_eq!(Reporter::indent("a\nb", 1), "    a\n    b");
        assert_eq!(Reporter::indent("a", 0), "a");
    }
}
