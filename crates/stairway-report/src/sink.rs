//! Output sinks for report text.

use parking_lot::Mutex;
use std::io::Write;

/// Destination for formatted report lines.
///
/// Sinks are shared (`Arc<dyn Sink>`) between every testable in a run, so
/// implementations guard their writer internally.
pub trait Sink: Send + Sync {
    /// Write one already-formatted chunk. The chunk may span multiple
    /// physical lines (banners do) and carries its own trailing newline.
    fn write_chunk(&self, chunk: &str);
}

/// Writes to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    lock: Mutex<()>,
}

impl ConsoleSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for ConsoleSink {
    fn write_chunk(&self, chunk: &str) {
        let _guard = self.lock.lock();
        let mut out = std::io::stdout();
        let _ = out.write_all(chunk.as_bytes());
        let _ = out.flush();
    }
}

/// Buffers everything in memory. Intended for unit tests that assert on
/// transcript contents.
#[derive(Debug, Default)]
pub struct CaptureSink {
    buf: Mutex<String>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buf.lock().clone()
    }

    /// Discard the buffer.
    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

impl Sink for CaptureSink {
    fn write_chunk(&self, chunk: &str) {
        self.buf.lock().push_str(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_sink_accumulates() {
        let sink = CaptureSink::new();
        sink.write_chunk("one\n");
        sink.write_chunk("two\n");
        assert_eq!(sink.contents(), "one\ntwo\n");
        sink.clear();
        assert_eq!(sink.contents(), "");
    }
}
