use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// FIFO byte buffer shared between the host thread and the program thread.
///
/// Unbounded unless a limit is given, in which case the oldest bytes are
/// dropped to make room for new ones.
pub struct ByteQueue {
    name: &'static str,
    bytes: Mutex<VecDeque<u8>>,
    limit: Option<usize>,
    dropped: AtomicU64,
}

impl ByteQueue {
    pub fn new(name: &'static str) -> Self {
        Self::with_limit(name, None)
    }

    pub fn with_limit(name: &'static str, limit: Option<usize>) -> Self {
        Self {
            name,
            bytes: Mutex::new(VecDeque::new()),
            limit,
            dropped: AtomicU64::new(0),
        }
    }

    pub fn append(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let mut queue = self.bytes.lock();
        queue.extend(bytes);

        let Some(limit) = self.limit else {
            return;
        };
        let excess = queue.len().saturating_sub(limit);
        if excess > 0 {
            queue.drain(..excess);
            drop(queue);
            self.dropped.fetch_add(excess as u64, Ordering::Relaxed);
            tracing::warn!(
                queue = self.name,
                dropped = excess,
                limit,
                "byte queue over limit, dropped oldest bytes"
            );
        }
    }

    /// Remove and return everything buffered.
    pub fn drain_all(&self) -> Vec<u8> {
        let mut queue = self.bytes.lock();
        queue.drain(..).collect()
    }

    /// Move up to `buf.len()` bytes into `buf`, oldest first.
    pub fn drain_into(&self, buf: &mut [u8]) -> usize {
        let mut queue = self.bytes.lock();
        let count = buf.len().min(queue.len());
        for (slot, byte) in buf.iter_mut().zip(queue.drain(..count)) {
            *slot = byte;
        }
        count
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Total bytes discarded because of the limit.
    pub fn dropped_bytes(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
