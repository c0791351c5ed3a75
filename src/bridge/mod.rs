mod dispatch;
mod lifecycle;
mod mouse;
mod ops;
mod queue;
mod reader;
mod sink;

pub use dispatch::{
    decode_pointer, decode_resize, DispatchError, EventDispatcher, HostValue,
    POINTER_REQUIRED_FIELDS,
};
pub use lifecycle::{BridgePhase, Lifecycle};
pub use mouse::{DisableMouseTracking, EnableMouseTracking, MouseTracking};
pub use ops::{DetachOp, DrainOp, HostOps, IngestOp};
pub use queue::ByteQueue;
pub use reader::{BlockingReader, DEFAULT_POLL_INTERVAL};
pub use sink::OutputSink;

use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::BridgeConfig;
use crate::events::MessageChannel;
use crate::program::{Program, ProgramError, ProgramIo};

/// Construction-time settings of a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeOptions {
    pub poll_interval: Duration,
    pub mouse_tracking: MouseTracking,
    pub input_limit: Option<usize>,
    pub output_limit: Option<usize>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            mouse_tracking: MouseTracking::default(),
            input_limit: None,
            output_limit: None,
        }
    }
}

impl BridgeOptions {
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn mouse_tracking(mut self, tracking: MouseTracking) -> Self {
        self.mouse_tracking = tracking;
        self
    }

    pub fn input_limit(mut self, limit: Option<usize>) -> Self {
        self.input_limit = limit;
        self
    }

    pub fn output_limit(mut self, limit: Option<usize>) -> Self {
        self.output_limit = limit;
        self
    }
}

impl From<&BridgeConfig> for BridgeOptions {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            mouse_tracking: config.mouse_tracking,
            input_limit: config.buffers.input_limit_bytes,
            output_limit: config.buffers.output_limit_bytes,
        }
    }
}

/// Connects one program to a non-blocking host.
///
/// The host talks to the program through the [`HostOps`] returned by
/// [`Bridge::new`]; [`Bridge::run`] drives the program until it quits.
/// Dropping a bridge that never started terminates it.
pub struct Bridge<P: Program> {
    started: bool,
    program: Option<P>,
    io: Option<ProgramIo<P::Message>>,
    output: Arc<ByteQueue>,
    lifecycle: Lifecycle,
    mouse_tracking: MouseTracking,
}

impl<P: Program> Bridge<P> {
    pub fn new(program: P, options: BridgeOptions) -> (Self, HostOps<P::Message>) {
        let input = Arc::new(ByteQueue::with_limit("input", options.input_limit));
        let output = Arc::new(ByteQueue::with_limit("output", options.output_limit));
        let lifecycle = Lifecycle::new();
        let messages = MessageChannel::new();

        let ops = HostOps {
            input: IngestOp::new(Arc::clone(&input), lifecycle.clone()),
            output: DrainOp::new(Arc::clone(&output)),
            events: EventDispatcher::new(messages.sender(), lifecycle.clone()),
            detach: DetachOp::new(lifecycle.clone()),
        };
        let io = ProgramIo {
            input: BlockingReader::new(input, lifecycle.clone(), options.poll_interval),
            output: OutputSink::new(Arc::clone(&output)),
            messages,
            mouse_tracking: options.mouse_tracking,
        };

        let bridge = Self {
            started: false,
            program: Some(program),
            io: Some(io),
            output,
            lifecycle,
            mouse_tracking: options.mouse_tracking,
        };
        (bridge, ops)
    }

    pub fn phase(&self) -> BridgePhase {
        self.lifecycle.phase()
    }

    /// Run the program loop on its own thread and block until it ends.
    ///
    /// The bridge is terminated when this returns, whatever the outcome.
    pub fn run(self) -> Result<P::Model, ProgramError> {
        self.start()?.join()
    }

    /// Start the program loop on its own thread without waiting for it.
    pub fn start(mut self) -> Result<RunningBridge<P>, ProgramError> {
        let (Some(program), Some(io)) = (self.program.take(), self.io.take()) else {
            return Err(ProgramError::Failed("bridge already started".to_string()));
        };
        if !self.lifecycle.advance(BridgePhase::Running) {
            return Err(ProgramError::Failed(
                "bridge detached before start".to_string(),
            ));
        }

        let mut sink = OutputSink::new(Arc::clone(&self.output));
        mouse::enable(&mut sink, self.mouse_tracking)?;

        let handle = thread::Builder::new()
            .name("program-loop".to_string())
            .spawn(move || program.run(io))
            .map_err(ProgramError::Spawn)?;

        self.started = true;
        Ok(RunningBridge {
            handle: Some(handle),
            sink,
            lifecycle: self.lifecycle.clone(),
            mouse_tracking: self.mouse_tracking,
        })
    }
}

impl<P: Program> Drop for Bridge<P> {
    fn drop(&mut self) {
        // A started bridge hands termination over to its `RunningBridge`.
        if !self.started {
            self.lifecycle.terminate();
        }
    }
}

/// A bridge whose program loop is running.
///
/// Dropping it terminates the bridge without waiting for the program.
pub struct RunningBridge<P: Program> {
    handle: Option<JoinHandle<Result<P::Model, ProgramError>>>,
    sink: OutputSink,
    lifecycle: Lifecycle,
    mouse_tracking: MouseTracking,
}

impl<P: Program> RunningBridge<P> {
    pub fn phase(&self) -> BridgePhase {
        self.lifecycle.phase()
    }

    /// Block until the program loop ends, then terminate the bridge.
    pub fn join(mut self) -> Result<P::Model, ProgramError> {
        let Some(handle) = self.handle.take() else {
            return Err(ProgramError::Failed("program already joined".to_string()));
        };
        let result = handle
            .join()
            .unwrap_or_else(|panic| Err(ProgramError::Panicked(panic_message(panic))));

        mouse::disable(&mut self.sink, self.mouse_tracking)?;
        match &result {
            Ok(_) => tracing::info!("Program loop finished"),
            Err(err) => tracing::error!("Program loop ended abnormally: {}", err),
        }
        result
    }
}

impl<P: Program> Drop for RunningBridge<P> {
    fn drop(&mut self) {
        self.lifecycle.terminate();
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = panic.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}
