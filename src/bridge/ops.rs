//! Host-callable operations.
//!
//! Each operation is a small cloneable object holding only the shared state
//! it touches, so a host can hand them out individually (one per exported
//! function, callback slot, etc).

use std::sync::Arc;

use parking_lot::Mutex;

use super::dispatch::EventDispatcher;
use super::lifecycle::Lifecycle;
use super::queue::ByteQueue;

/// Appends host bytes to the program's input.
#[derive(Clone)]
pub struct IngestOp {
    queue: Arc<ByteQueue>,
    lifecycle: Lifecycle,
}

impl IngestOp {
    pub(crate) fn new(queue: Arc<ByteQueue>, lifecycle: Lifecycle) -> Self {
        Self { queue, lifecycle }
    }

    /// Returns `false` (and drops the bytes) once the bridge is terminated.
    pub fn ingest(&self, bytes: &[u8]) -> bool {
        if self.lifecycle.is_terminated() {
            tracing::debug!("Ignoring {} input bytes: bridge terminated", bytes.len());
            return false;
        }
        self.queue.append(bytes);
        tracing::trace!("Ingested {} bytes", bytes.len());
        true
    }
}

/// Takes the program's accumulated output.
///
/// Output produced before termination can still be drained afterwards.
#[derive(Clone)]
pub struct DrainOp {
    queue: Arc<ByteQueue>,
    // Incomplete UTF-8 tail held back by `drain_text`.
    pending: Arc<Mutex<Vec<u8>>>,
}

impl DrainOp {
    pub(crate) fn new(queue: Arc<ByteQueue>) -> Self {
        Self {
            queue,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn drain(&self) -> Vec<u8> {
        let mut pending = self.pending.lock();
        let mut bytes = std::mem::take(&mut *pending);
        bytes.extend(self.queue.drain_all());
        bytes
    }

    /// Drain as text. A multi-byte character cut off at the end of the
    /// buffer is kept for the next call instead of being mangled.
    pub fn drain_text(&self) -> String {
        let mut pending = self.pending.lock();
        let mut bytes = std::mem::take(&mut *pending);
        bytes.extend(self.queue.drain_all());

        *pending = bytes.split_off(incomplete_tail_start(&bytes));
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Index where a trailing, not yet complete UTF-8 sequence begins, or
/// `bytes.len()` when the buffer does not end mid-character. Invalid bytes
/// earlier in the buffer do not matter.
fn incomplete_tail_start(bytes: &[u8]) -> usize {
    // An incomplete sequence is at most three bytes long.
    let floor = bytes.len().saturating_sub(3);
    for start in (floor..bytes.len()).rev() {
        if bytes[start] & 0xC0 == 0x80 {
            continue;
        }
        return match std::str::from_utf8(&bytes[start..]) {
            Err(err) if err.valid_up_to() == 0 && err.error_len().is_none() => start,
            _ => bytes.len(),
        };
    }
    bytes.len()
}

/// Host-initiated teardown.
#[derive(Clone)]
pub struct DetachOp {
    lifecycle: Lifecycle,
}

impl DetachOp {
    pub(crate) fn new(lifecycle: Lifecycle) -> Self {
        Self { lifecycle }
    }

    /// Terminate the bridge: input and dispatch become no-ops and a program
    /// blocked on input gets an error. Returns `false` if already terminated.
    pub fn detach(&self) -> bool {
        self.lifecycle.terminate()
    }
}

/// The full host-facing surface of one bridge.
pub struct HostOps<M> {
    pub input: IngestOp,
    pub output: DrainOp,
    pub events: EventDispatcher<M>,
    pub detach: DetachOp,
}

impl<M> Clone for HostOps<M> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            output: self.output.clone(),
            events: self.events.clone(),
            detach: self.detach.clone(),
        }
    }
}
