use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// Install the global subscriber.
///
/// With a log file, events are appended to it as JSON lines; otherwise they
/// go to stderr. `RUST_LOG` overrides the default level either way.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), CliError> {
    match log_file {
        Some(path) => {
            let sink = LockedSink::new(OpenOptions::new().create(true).append(true).open(path)?);
            let make_writer = BoxMakeWriter::new(move || sink.clone());

            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(make_writer);

            tracing_subscriber::registry()
                .with(env_filter("info"))
                .with(layer)
                .try_init()
                .map_err(|err| CliError::Logging(err.to_string()))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

            tracing_subscriber::registry()
                .with(env_filter("warn"))
                .with(layer)
                .try_init()
                .map_err(|err| CliError::Logging(err.to_string()))
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Cloneable handle that serializes writes from every thread onto one sink.
pub(crate) struct LockedSink<W> {
    shared: Arc<Mutex<W>>,
}

impl<W> Clone for LockedSink<W> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<W: Write> LockedSink<W> {
    pub(crate) fn new(sink: W) -> Self {
        Self {
            shared: Arc::new(Mutex::new(sink)),
        }
    }

    pub(crate) fn with_sink<T>(&self, op: impl FnOnce(&mut W) -> io::Result<T>) -> io::Result<T> {
        let mut sink = self
            .shared
            .lock()
            .map_err(|_| io::Error::other("log sink lock poisoned"))?;
        op(&mut *sink)
    }
}

impl<W: Write> Write for LockedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_sink(|sink| sink.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_sink(Write::flush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_append_to_one_sink() {
        let mut first = LockedSink::new(Vec::new());
        let mut second = first.clone();
        first.write_all(b"{\"a\":1}\n").expect("write first");
        second.write_all(b"{\"b\":2}\n").expect("write second");
        second.flush().expect("flush");

        let lines = first.with_sink(|sink| Ok(sink.clone())).expect("read sink");
        assert_eq!(lines, b"{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn poisoned_lock_is_an_io_error() {
        let mut sink = LockedSink::new(Vec::new());
        let shared = Arc::clone(&sink.shared);
        let _ = std::thread::spawn(move || {
            let _guard = shared.lock();
            panic!("poison the lock");
        })
        .join();

        let err = sink.write(b"line").expect_err("poisoned");
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
