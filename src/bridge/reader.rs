use std::io::{self, Read};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::lifecycle::Lifecycle;
use super::queue::ByteQueue;

/// Default interval between checks of an empty input queue.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocking view of the host→program byte queue.
///
/// The host has no way to wake a sleeping reader, so an empty queue is
/// re-checked every `poll_interval`. The interval bounds input latency.
/// Once the bridge is terminated and the queue is drained, reads fail with
/// `BrokenPipe` instead of waiting for input that can no longer arrive.
pub struct BlockingReader {
    queue: Arc<ByteQueue>,
    lifecycle: Lifecycle,
    poll_interval: Duration,
}

impl BlockingReader {
    pub(crate) fn new(queue: Arc<ByteQueue>, lifecycle: Lifecycle, poll_interval: Duration) -> Self {
        Self {
            queue,
            lifecycle,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Read for BlockingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let count = self.queue.drain_into(buf);
            if count > 0 {
                return Ok(count);
            }
            if self.lifecycle.is_terminated() {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "bridge detached",
                ));
            }
            thread::sleep(self.poll_interval);
        }
    }
}
