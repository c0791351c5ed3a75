//! Typed messages the host injects into a running program.

use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Viewport size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press,
    Release,
    Motion,
    Wheel,
}

impl PointerAction {
    /// Decode the host's numeric action code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PointerAction::Press),
            1 => Some(PointerAction::Release),
            2 => Some(PointerAction::Motion),
            3 => Some(PointerAction::Wheel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    None,
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

impl PointerButton {
    /// Decode the host's numeric button code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PointerButton::None),
            1 => Some(PointerButton::Left),
            2 => Some(PointerButton::Middle),
            3 => Some(PointerButton::Right),
            4 => Some(PointerButton::WheelUp),
            5 => Some(PointerButton::WheelDown),
            _ => None,
        }
    }

    pub fn is_wheel(self) -> bool {
        matches!(self, PointerButton::WheelUp | PointerButton::WheelDown)
    }
}

/// Pointer activity at a cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub button: PointerButton,
    pub x: u32,
    pub y: u32,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

/// Structured host events, delivered outside the input byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMessage {
    Resize(ResizeEvent),
    Pointer(PointerEvent),
}

/// Inbound message queue of a program.
///
/// Host messages arrive converted into the program's own message type `M`,
/// interleaved with whatever the program sends itself through [`sender`].
///
/// [`sender`]: MessageChannel::sender
pub struct MessageChannel<M> {
    rx: Receiver<M>,
    tx: Sender<M>,
}

impl<M> MessageChannel<M> {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { rx, tx }
    }

    /// Wait for the next message. The channel holds a sender of its own, so
    /// this only fails if the channel itself is being torn down.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.rx.recv()
    }

    pub fn next(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn try_next(&self) -> Result<M, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn sender(&self) -> Sender<M> {
        self.tx.clone()
    }
}
