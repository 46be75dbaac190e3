pub mod json;

use std::io::{self, Write};

pub use json::write_json_file;

/// Sink wrapper that tracks how far the output stream has advanced.
pub(crate) struct TrackedSink<W> {
    inner: W,
    position: u64,
}

impl<W: Write> TrackedSink<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes accepted by the inner writer so far.
    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    /// Bytes accepted since `mark`, a value previously read from `position`.
    pub(crate) fn since(&self, mark: u64) -> u64 {
        self.position.saturating_sub(mark)
    }

    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TrackedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = self.inner.write(buf)?;
        self.position += accepted as u64;
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
