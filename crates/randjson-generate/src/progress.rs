use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

use crate::errors::GenerationError;

/// Progress notification emitted by the generator and the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// One value was generated and attached to the tree.
    Generated { done: u64, total: u64 },
    /// One scalar value or container close was written.
    Written { writes: u64 },
}

/// Receives progress notifications synchronously.
pub trait ProgressObserver {
    fn notify(&mut self, event: ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: FnMut(ProgressEvent),
{
    fn notify(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Forwards events to a queue drained by the caller. A dropped receiver
/// silently discards further events.
impl ProgressObserver for Sender<ProgressEvent> {
    fn notify(&mut self, event: ProgressEvent) {
        let _ = self.send(event);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn notify(&mut self, _event: ProgressEvent) {}
}

/// Cooperative cancellation flag shared between a run and its controller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), GenerationError> {
        if self.is_cancelled() {
            Err(GenerationError::Cancelled)
        } else {
            Ok(())
        }
    }
}
