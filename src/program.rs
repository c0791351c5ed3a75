//! The interface a wrapped program implements to run behind a bridge.

use std::io;

use thiserror::Error;

use crate::bridge::{BlockingReader, MouseTracking, OutputSink};
use crate::events::{HostMessage, MessageChannel};

/// Why a program loop ended abnormally.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("program I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("program loop panicked: {0}")]
    Panicked(String),

    #[error("program failed: {0}")]
    Failed(String),

    #[error("failed to start program thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Everything a program gets wired to when the bridge starts it.
pub struct ProgramIo<M> {
    /// Host input as a blocking byte stream.
    pub input: BlockingReader,
    /// Rendered output, drained by the host.
    pub output: OutputSink,
    /// Host resize/pointer messages plus the program's own.
    pub messages: MessageChannel<M>,
    pub mouse_tracking: MouseTracking,
}

/// A read-update-render loop that can run behind a bridge.
///
/// `run` executes on its own thread and owns the whole interactive session:
/// it returns when the program quits.
pub trait Program: Send + 'static {
    /// Message type of the program's event loop.
    type Message: From<HostMessage> + Send + 'static;
    /// Final state handed back when the loop ends.
    type Model: Send + 'static;

    fn run(self, io: ProgramIo<Self::Message>) -> Result<Self::Model, ProgramError>;
}
