use std::io::{self, Write};
use std::sync::Arc;

use super::queue::ByteQueue;

/// Program-side writer that appends rendered output for the host to drain.
pub struct OutputSink {
    queue: Arc<ByteQueue>,
}

impl OutputSink {
    pub(crate) fn new(queue: Arc<ByteQueue>) -> Self {
        Self { queue }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.queue.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
